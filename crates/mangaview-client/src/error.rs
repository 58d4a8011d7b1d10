//! Reader error types.

use thiserror::Error;

use mangaview_protocols::{AddressForm, ChapterLoadError, ImageLoadError};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReaderError {
    /// The chapter could not be opened; fatal for the reader view.
    #[error("Failed to load chapter: {0}")]
    Chapter(#[from] ChapterLoadError),

    /// Both addressing forms failed for one page.
    #[error("Failed to load page {page} ({primary_form}: {primary}; {fallback_form}: {fallback})")]
    PageFailed {
        page: usize,
        primary_form: AddressForm,
        primary: ImageLoadError,
        fallback_form: AddressForm,
        fallback: ImageLoadError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chapter_error_display() {
        let err = ReaderError::from(ChapterLoadError::NoPagesFound);
        assert!(err.to_string().starts_with("Failed to load chapter:"));
    }

    #[test]
    fn test_page_failed_display() {
        let err = ReaderError::PageFailed {
            page: 4,
            primary_form: AddressForm::Proxied,
            primary: ImageLoadError::Status(502),
            fallback_form: AddressForm::Direct,
            fallback: ImageLoadError::Network("reset".to_string()),
        };
        let text = err.to_string();
        assert!(text.contains("page 4"));
        assert!(text.contains("HTTP status 502"));
        assert!(text.contains("reset"));
    }
}
