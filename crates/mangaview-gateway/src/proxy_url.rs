//! Proxied image URL construction.

use url::form_urlencoded;

/// Path of the image relay endpoint.
pub const PROXY_IMAGE_PATH: &str = "/api/proxy-image";

/// Builds relay URLs for direct image URLs.
#[derive(Debug, Clone, Default)]
pub struct ProxyUrlBuilder {
    base: String,
}

impl ProxyUrlBuilder {
    /// `base` is the public origin of the relay; empty yields relative URLs.
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn proxied(&self, direct_url: &str) -> String {
        let encoded: String = form_urlencoded::byte_serialize(direct_url.as_bytes()).collect();
        format!("{}{}?url={}", self.base, PROXY_IMAGE_PATH, encoded)
    }

    pub fn proxied_all(&self, direct_urls: &[String]) -> Vec<String> {
        direct_urls.iter().map(|u| self.proxied(u)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_proxy_url() {
        let builder = ProxyUrlBuilder::default();
        assert_eq!(
            builder.proxied("https://x.mangadex.network/data/h/1.jpg"),
            "/api/proxy-image?url=https%3A%2F%2Fx.mangadex.network%2Fdata%2Fh%2F1.jpg"
        );
    }

    #[test]
    fn test_absolute_proxy_url_trims_slash() {
        let builder = ProxyUrlBuilder::new("https://reader.example.com/");
        let url = builder.proxied("https://a/b.png");
        assert!(url.starts_with("https://reader.example.com/api/proxy-image?url="));
    }

    #[test]
    fn test_proxied_all_keeps_order() {
        let builder = ProxyUrlBuilder::new("http://relay");
        let urls = builder.proxied_all(&["https://a/1".to_string(), "https://a/2".to_string()]);
        assert_eq!(urls.len(), 2);
        assert!(urls[0].ends_with("%2F1"));
        assert!(urls[1].ends_with("%2F2"));
    }

    #[test]
    fn test_query_characters_are_encoded() {
        let builder = ProxyUrlBuilder::default();
        let url = builder.proxied("https://a/1.jpg?token=x&y=z");
        assert!(url.contains("%3Ftoken%3Dx%26y%3Dz"));
    }
}
