//! MangaDex upstream client.

mod api;
mod client;
mod convert;

pub use client::MangaDexGateway;
