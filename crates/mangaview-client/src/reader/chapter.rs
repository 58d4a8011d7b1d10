//! Opening a chapter for reading.

use tracing::{info, warn};

use mangaview_protocols::{CatalogGateway, ChapterLoadError, ChapterPageSet};

/// Fetch and validate a chapter's page set. Called once per chapter load;
/// a chapter with zero pages fails with [`ChapterLoadError::NoPagesFound`].
pub async fn open_chapter(
    gateway: &dyn CatalogGateway,
    chapter_id: &str,
    data_saver: bool,
) -> Result<ChapterPageSet, ChapterLoadError> {
    let listing = gateway
        .chapter_pages(chapter_id, data_saver)
        .await
        .inspect_err(|e| warn!("Chapter {} unavailable: {}", chapter_id, e))?;

    let pages = ChapterPageSet::try_from(listing)
        .inspect_err(|e| warn!("Chapter {} rejected: {}", chapter_id, e))?;
    info!("Opened chapter {} with {} pages", chapter_id, pages.len());
    Ok(pages)
}
