//! Error types shared across the MangaView crates.

mod chapter;
mod gateway;
mod image;

pub use chapter::*;
pub use gateway::*;
pub use image::*;
