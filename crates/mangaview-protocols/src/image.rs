//! Page image loading.

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::ImageLoadError;

/// A successfully fetched page image.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedImage {
    pub content_type: String,
    pub bytes: Bytes,
}

impl LoadedImage {
    pub fn new(content_type: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    /// File extension matching the content type.
    pub fn extension(&self) -> &'static str {
        let subtype = self
            .content_type
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .trim_start_matches("image/");
        match subtype {
            "png" => "png",
            "webp" => "webp",
            "gif" => "gif",
            _ => "jpg",
        }
    }
}

/// Fetches page images. Failures of any kind (network, status, decode)
/// count as a failed load for the reader.
#[async_trait]
pub trait ImageLoader: Send + Sync {
    async fn load(&self, url: &str) -> Result<LoadedImage, ImageLoadError>;
}
