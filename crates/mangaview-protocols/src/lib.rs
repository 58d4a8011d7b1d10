//! # MangaView Protocols
//!
//! Shared definitions for the MangaView workspace. Contains only types and
//! traits; the HTTP clients, the relay server and the reader live in their
//! own crates.
//!
//! ## Core Traits
//!
//! - [`CatalogGateway`] - series search, details and chapter page listings
//! - [`ImageLoader`] - fetches one page image by URL

pub mod catalog;
pub mod envelope;
pub mod error;
pub mod gateway;
pub mod image;

pub use catalog::{
    AddressForm, BrowseOrder, ChapterInfo, ChapterPageSet, ChapterSummary, PageListing,
    SearchPage, SeriesDetails, SeriesSummary, VolumeGroup, NO_CHAPTER, NO_VOLUME,
};
pub use envelope::Envelope;
pub use error::{ChapterLoadError, GatewayError, ImageLoadError};
pub use gateway::CatalogGateway;
pub use image::{ImageLoader, LoadedImage};
