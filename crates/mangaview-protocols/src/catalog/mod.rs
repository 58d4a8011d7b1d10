//! Catalog data model.
//!
//! Only the fields the reader and the listing views need are modelled; the
//! upstream schema is far larger.

mod pages;
mod series;

pub use pages::*;
pub use series::*;
