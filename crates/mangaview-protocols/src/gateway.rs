//! Catalog gateway trait.

use async_trait::async_trait;

use crate::catalog::{BrowseOrder, ChapterInfo, PageListing, SearchPage, SeriesDetails};
use crate::error::GatewayError;

/// Source of series, chapter and page metadata.
///
/// Implemented by the upstream MangaDex client (used by the relay server)
/// and by the relay client (used by the reader).
#[async_trait]
pub trait CatalogGateway: Send + Sync {
    /// Search series by title. `page` is 1-based.
    async fn search(&self, query: &str, page: u32) -> Result<SearchPage, GatewayError>;

    /// List series for a home-page section.
    async fn browse(&self, order: BrowseOrder, limit: u32) -> Result<SearchPage, GatewayError>;

    /// Series metadata with chapters grouped by volume.
    async fn series_details(&self, series_id: &str) -> Result<SeriesDetails, GatewayError>;

    /// Metadata for one chapter.
    async fn chapter_info(&self, chapter_id: &str) -> Result<ChapterInfo, GatewayError>;

    /// Page URLs for one chapter in both addressing forms.
    async fn chapter_pages(
        &self,
        chapter_id: &str,
        data_saver: bool,
    ) -> Result<PageListing, GatewayError>;
}
