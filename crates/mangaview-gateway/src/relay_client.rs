//! Catalog gateway that talks to a MangaView relay.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use mangaview_protocols::{
    BrowseOrder, CatalogGateway, ChapterInfo, Envelope, GatewayError, PageListing, SearchPage,
    SeriesDetails,
};

use crate::http;

/// Relay-backed [`CatalogGateway`] used by the reader.
#[derive(Debug, Clone)]
pub struct RelayClient {
    client: Client,
    base: Url,
    timeout: Duration,
}

impl RelayClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| GatewayError::Network(e.to_string()))?;
        Self::with_client(client, base_url, timeout)
    }

    pub fn with_client(
        client: Client,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let mut base = Url::parse(base_url)
            .map_err(|e| GatewayError::InvalidRequest(format!("relay url {}: {}", base_url, e)))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self {
            client,
            base,
            timeout,
        })
    }

    /// `path` is relative to the relay base, so a base path prefix is kept.
    fn endpoint(&self, path: &str) -> Result<Url, GatewayError> {
        self.base
            .join(path)
            .map_err(|e| GatewayError::InvalidRequest(e.to_string()))
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, GatewayError> {
        let url = self.endpoint(path)?;
        debug!("Relay GET {}", url);

        let response = http::send(self.client.get(url).query(query), self.timeout).await?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| http::classify(e, self.timeout))?;

        let envelope: Envelope<T> = match serde_json::from_slice(&body) {
            Ok(envelope) => envelope,
            Err(e) if status.is_success() => {
                return Err(GatewayError::InvalidResponse(e.to_string()));
            }
            // Not a relay error body, e.g. from a reverse proxy.
            Err(_) => {
                let mut text = String::from_utf8_lossy(&body).into_owned();
                http::truncate_error_body(&mut text);
                Envelope::err(text)
            }
        };

        match envelope.into_result() {
            Ok(payload) if status.is_success() => Ok(payload),
            Ok(_) => Err(GatewayError::Upstream {
                status: status.as_u16(),
                message: "unexpected success body".to_string(),
            }),
            Err(message) => Err(match status {
                StatusCode::NOT_FOUND => GatewayError::NotFound(message),
                StatusCode::BAD_REQUEST => GatewayError::InvalidRequest(message),
                _ => GatewayError::Upstream {
                    status: status.as_u16(),
                    message,
                },
            }),
        }
    }

    /// Proxied URLs may be relative to the relay, e.g. `/api/proxy-image?..`.
    fn absolutize(&self, urls: Vec<String>) -> Result<Vec<String>, GatewayError> {
        urls.into_iter()
            .map(|u| {
                let relative = match u.strip_prefix('/') {
                    Some(rest) if !rest.starts_with('/') => rest,
                    _ => u.as_str(),
                };
                self.endpoint(relative).map(String::from)
            })
            .collect()
    }
}

#[async_trait]
impl CatalogGateway for RelayClient {
    async fn search(&self, query: &str, page: u32) -> Result<SearchPage, GatewayError> {
        self.get(
            "api/search",
            &[("query", query.to_string()), ("page", page.max(1).to_string())],
        )
        .await
    }

    async fn browse(&self, order: BrowseOrder, limit: u32) -> Result<SearchPage, GatewayError> {
        self.get(
            "api/browse",
            &[
                ("order", order.sort_key().to_string()),
                ("limit", limit.to_string()),
            ],
        )
        .await
    }

    async fn series_details(&self, series_id: &str) -> Result<SeriesDetails, GatewayError> {
        self.get(&format!("api/series/{}", series_id), &[]).await
    }

    async fn chapter_info(&self, chapter_id: &str) -> Result<ChapterInfo, GatewayError> {
        self.get(&format!("api/chapter/{}", chapter_id), &[]).await
    }

    async fn chapter_pages(
        &self,
        chapter_id: &str,
        data_saver: bool,
    ) -> Result<PageListing, GatewayError> {
        let mut listing: PageListing = self
            .get(
                &format!("api/chapter/{}/pages", chapter_id),
                &[("dataSaver", data_saver.to_string())],
            )
            .await?;

        listing.proxied_urls = match listing.proxied_urls.take() {
            Some(urls) => Some(self.absolutize(urls)?),
            None => None,
        };
        Ok(listing)
    }
}

#[cfg(test)]
#[path = "relay_client_tests.rs"]
mod tests;
