//! # MangaView Relay
//!
//! HTTP relay between browser-side readers and the MangaDex catalog:
//!
//! - **Catalog**: search, browse, series details, chapter metadata and
//!   chapter page listings, wrapped in the `{"ok": ...}` / `{"error": ...}`
//!   envelope.
//! - **Image relay**: fetches page images from allowlisted hosts with the
//!   headers the image servers expect and streams them back.
//! - **Monitoring**: `/health` and `/livez`.
//!
//! ```text
//! reader ──► /api/*            ──► CatalogGateway (MangaDex) ──► api.mangadex.org
//!        └─► /api/proxy-image  ──► image host (*.mangadex.network)
//! ```

pub mod cache;
pub mod error;
pub mod http;
pub mod server;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use cache::ResponseCache;
pub use error::ApiError;
pub use http::routes::create_router;
pub use server::RelayServer;
pub use state::AppState;
