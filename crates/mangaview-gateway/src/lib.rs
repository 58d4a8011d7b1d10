//! # MangaView Gateway
//!
//! HTTP implementations of the catalog and image contracts:
//!
//! - [`MangaDexGateway`] talks to the upstream MangaDex REST API and is what
//!   the relay server serves from.
//! - [`RelayClient`] talks to a MangaView relay and is what the reader uses
//!   as its catalog gateway.
//! - [`HttpImageLoader`] fetches page images in either addressing form.

mod http;
mod image_loader;
mod mangadex;
mod proxy_url;
mod relay_client;

pub use image_loader::HttpImageLoader;
pub use mangadex::MangaDexGateway;
pub use proxy_url::{ProxyUrlBuilder, PROXY_IMAGE_PATH};
pub use relay_client::RelayClient;
