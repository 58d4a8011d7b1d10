//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub upstream: UpstreamConfig,

    #[serde(default)]
    pub relay: RelayConfig,

    #[serde(default)]
    pub reader: ReaderConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Relay server bind address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Upstream catalog API (MangaDex).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Human-facing site, used for external fallback links.
    #[serde(default = "default_site_base")]
    pub site_base: String,

    #[serde(default = "default_covers_base")]
    pub covers_base: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_upstream_timeout")]
    pub timeout_seconds: u64,

    #[serde(default = "default_chapter_timeout")]
    pub chapter_timeout_seconds: u64,

    /// Translated language requested for chapter feeds.
    #[serde(default = "default_language")]
    pub language: String,
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn chapter_timeout(&self) -> Duration {
        Duration::from_secs(self.chapter_timeout_seconds)
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            site_base: default_site_base(),
            covers_base: default_covers_base(),
            user_agent: default_user_agent(),
            timeout_seconds: default_upstream_timeout(),
            chapter_timeout_seconds: default_chapter_timeout(),
            language: default_language(),
        }
    }
}

fn default_api_base() -> String {
    "https://api.mangadex.org".to_string()
}

fn default_site_base() -> String {
    "https://mangadex.org".to_string()
}

fn default_covers_base() -> String {
    "https://uploads.mangadex.org".to_string()
}

fn default_user_agent() -> String {
    concat!("MangaView/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_upstream_timeout() -> u64 {
    12
}

fn default_chapter_timeout() -> u64 {
    10
}

fn default_language() -> String {
    "en".to_string()
}

/// Relay endpoints (catalog JSON and image relay).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Base the proxied page URLs are built on. Empty means relative URLs.
    #[serde(default)]
    pub public_base: String,

    /// Host suffixes the image relay may fetch from. Empty allows any host.
    #[serde(default = "default_allowed_image_hosts")]
    pub allowed_image_hosts: Vec<String>,

    #[serde(default = "default_image_timeout")]
    pub image_timeout_seconds: u64,

    /// `Cache-Control: max-age` for relayed images.
    #[serde(default = "default_image_cache_max_age")]
    pub image_cache_max_age: u64,

    /// Lifetime of cached catalog responses. 0 disables the cache.
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_seconds: u64,

    /// Value of the `preferProxy` hint handed to readers.
    #[serde(default = "default_true")]
    pub prefer_proxy: bool,
}

impl RelayConfig {
    pub fn image_timeout(&self) -> Duration {
        Duration::from_secs(self.image_timeout_seconds)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            public_base: String::new(),
            allowed_image_hosts: default_allowed_image_hosts(),
            image_timeout_seconds: default_image_timeout(),
            image_cache_max_age: default_image_cache_max_age(),
            cache_ttl_seconds: default_cache_ttl(),
            prefer_proxy: true,
        }
    }
}

fn default_allowed_image_hosts() -> Vec<String> {
    vec!["mangadex.network".to_string(), "mangadex.org".to_string()]
}

fn default_image_timeout() -> u64 {
    15
}

fn default_image_cache_max_age() -> u64 {
    86_400
}

fn default_cache_ttl() -> u64 {
    3_600
}

fn default_true() -> bool {
    true
}

/// Reader host settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReaderConfig {
    /// Relay the reader talks to.
    #[serde(default = "default_relay_url")]
    pub relay_url: String,

    #[serde(default = "default_true")]
    pub data_saver: bool,

    /// Override the relay's `preferProxy` hint when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefer_proxy: Option<bool>,

    /// Horizontal travel (px) a swipe needs to turn the page.
    #[serde(default = "default_swipe_threshold")]
    pub swipe_threshold: f32,

    #[serde(default = "default_gateway_timeout")]
    pub gateway_timeout_seconds: u64,
}

impl ReaderConfig {
    pub fn gateway_timeout(&self) -> Duration {
        Duration::from_secs(self.gateway_timeout_seconds)
    }
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            relay_url: default_relay_url(),
            data_saver: true,
            prefer_proxy: None,
            swipe_threshold: default_swipe_threshold(),
            gateway_timeout_seconds: default_gateway_timeout(),
        }
    }
}

fn default_relay_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_swipe_threshold() -> f32 {
    50.0
}

fn default_gateway_timeout() -> u64 {
    20
}

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log directory. Defaults to `~/.mangaview/logs`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,

    #[serde(default = "default_max_files")]
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: None,
            max_files: default_max_files(),
        }
    }
}

fn default_max_files() -> usize {
    14
}

impl LoggingConfig {
    /// Resolved log directory.
    pub fn resolved_dir(&self) -> PathBuf {
        match &self.dir {
            Some(dir) => PathBuf::from(crate::ConfigLoader::expand_path(&dir.to_string_lossy())),
            None => dirs::home_dir()
                .map(|h| h.join(".mangaview").join("logs"))
                .unwrap_or_else(|| PathBuf::from(".mangaview/logs")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.addr(), "127.0.0.1:8080");
        assert_eq!(config.upstream.api_base, "https://api.mangadex.org");
        assert_eq!(config.upstream.chapter_timeout(), Duration::from_secs(10));
        assert!(config.relay.prefer_proxy);
        assert_eq!(config.relay.image_timeout(), Duration::from_secs(15));
        assert_eq!(config.reader.swipe_threshold, 50.0);
        assert!(config.reader.prefer_proxy.is_none());
    }

    #[test]
    fn test_default_allowlist() {
        let relay = RelayConfig::default();
        assert!(relay.allowed_image_hosts.contains(&"mangadex.network".to_string()));
    }

    #[test]
    fn test_user_agent_has_version() {
        let upstream = UpstreamConfig::default();
        assert!(upstream.user_agent.starts_with("MangaView/"));
    }

    #[test]
    fn test_logging_dir_override() {
        let logging = LoggingConfig {
            dir: Some(PathBuf::from("/var/log/mangaview")),
            max_files: 3,
        };
        assert_eq!(logging.resolved_dir(), PathBuf::from("/var/log/mangaview"));
    }

    #[test]
    fn test_serialization_roundtrip_keeps_sections() {
        let config = Config::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("[server]"));
        assert!(toml.contains("[relay]"));
    }
}
