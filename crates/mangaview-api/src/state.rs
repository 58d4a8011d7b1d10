//! Application state.

use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::Client;

use mangaview_config::{Config, RelayConfig};
use mangaview_gateway::{MangaDexGateway, ProxyUrlBuilder};
use mangaview_protocols::{CatalogGateway, GatewayError};

use crate::cache::ResponseCache;

/// State shared across relay handlers.
pub struct AppState {
    pub gateway: Arc<dyn CatalogGateway>,
    /// Client used by the image relay.
    pub image_client: Client,
    pub relay: RelayConfig,
    /// Human-facing upstream site, used for external links and `Referer`.
    pub site_base: String,
    pub cache: ResponseCache,
    start_time: Instant,
}

impl AppState {
    pub fn new(
        gateway: Arc<dyn CatalogGateway>,
        image_client: Client,
        relay: RelayConfig,
        site_base: impl Into<String>,
    ) -> Self {
        let cache = ResponseCache::new(relay.cache_ttl());
        Self {
            gateway,
            image_client,
            relay,
            site_base: site_base.into().trim_end_matches('/').to_string(),
            cache,
            start_time: Instant::now(),
        }
    }

    /// Build the production state: a MangaDex gateway whose proxied page
    /// URLs point back at this relay.
    pub fn from_config(config: &Config) -> Result<Self, GatewayError> {
        let proxy = ProxyUrlBuilder::new(config.relay.public_base.clone());
        let gateway =
            MangaDexGateway::new(config.upstream.clone(), proxy, config.relay.prefer_proxy)?;

        let image_client = Client::builder()
            .user_agent(config.upstream.user_agent.clone())
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        Ok(Self::new(
            Arc::new(gateway),
            image_client,
            config.relay.clone(),
            config.upstream.site_base.clone(),
        ))
    }

    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Link to the chapter on the upstream site.
    pub fn external_chapter_url(&self, chapter_id: &str) -> String {
        format!("{}/chapter/{}", self.site_base, chapter_id)
    }
}
