//! HTTP page image loader.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use tracing::debug;

use mangaview_protocols::{ImageLoadError, ImageLoader, LoadedImage};

const IMAGE_ACCEPT: &str = "image/webp,image/*,*/*;q=0.8";
const DEFAULT_CONTENT_TYPE: &str = "image/jpeg";

/// Fetches page images over HTTP, in either addressing form.
///
/// No request timeout is applied; a stalled load is superseded by the
/// reader, not cancelled.
#[derive(Debug, Clone)]
pub struct HttpImageLoader {
    client: Client,
}

impl HttpImageLoader {
    pub fn new(user_agent: &str) -> Result<Self, ImageLoadError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| ImageLoadError::Network(e.to_string()))?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

/// Media type of a `Content-Type` value, lowercased and without parameters.
fn media_type(value: &str) -> String {
    value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

#[async_trait]
impl ImageLoader for HttpImageLoader {
    async fn load(&self, url: &str) -> Result<LoadedImage, ImageLoadError> {
        debug!("Loading image {}", url);

        let response = self
            .client
            .get(url)
            .header(ACCEPT, IMAGE_ACCEPT)
            .send()
            .await
            .map_err(|e| ImageLoadError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ImageLoadError::Status(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(media_type)
            .unwrap_or_default();

        let content_type = match content_type.as_str() {
            "" | "application/octet-stream" => DEFAULT_CONTENT_TYPE.to_string(),
            t if t.starts_with("image/") => content_type,
            _ => return Err(ImageLoadError::NotAnImage(content_type)),
        };

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ImageLoadError::Network(e.to_string()))?;
        if bytes.is_empty() {
            return Err(ImageLoadError::EmptyBody);
        }

        Ok(LoadedImage::new(content_type, bytes))
    }
}
