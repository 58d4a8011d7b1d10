//! Chapter-level load errors.
//!
//! These are fatal for a reader view: without a page list there is nothing
//! to retry page by page.

use thiserror::Error;

use super::GatewayError;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChapterLoadError {
    #[error("Catalog gateway unavailable: {0}")]
    GatewayUnavailable(#[from] GatewayError),

    #[error("No pages found for chapter")]
    NoPagesFound,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_gateway_error() {
        let err = ChapterLoadError::from(GatewayError::Timeout(10));
        assert!(matches!(err, ChapterLoadError::GatewayUnavailable(GatewayError::Timeout(10))));
        assert!(err.to_string().contains("unavailable"));
    }

    #[test]
    fn test_no_pages_display() {
        assert_eq!(ChapterLoadError::NoPagesFound.to_string(), "No pages found for chapter");
    }
}
