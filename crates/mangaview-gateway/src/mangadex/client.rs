//! MangaDex implementation of [`CatalogGateway`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use mangaview_config::UpstreamConfig;
use mangaview_protocols::{
    BrowseOrder, CatalogGateway, ChapterInfo, GatewayError, PageListing, SearchPage, SeriesDetails,
};

use super::api::{AtHomeServer, Chapter, Collection, Entity, Manga};
use super::convert;
use crate::http;
use crate::proxy_url::ProxyUrlBuilder;

/// Results per search page.
pub const SEARCH_PAGE_SIZE: u32 = 20;

/// Chapters requested per feed call.
const FEED_PAGE_SIZE: u64 = 500;

/// Upper bound on feed calls for one series.
const MAX_FEED_PAGES: u64 = 20;

/// Timeout of the secondary series title lookup.
const TITLE_LOOKUP_TIMEOUT: Duration = Duration::from_secs(8);

type Query = Vec<(&'static str, String)>;

/// Catalog gateway backed by the MangaDex REST API.
#[derive(Debug, Clone)]
pub struct MangaDexGateway {
    client: Client,
    config: UpstreamConfig,
    proxy: ProxyUrlBuilder,
    prefer_proxy: bool,
}

impl MangaDexGateway {
    pub fn new(
        config: UpstreamConfig,
        proxy: ProxyUrlBuilder,
        prefer_proxy: bool,
    ) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| GatewayError::Network(e.to_string()))?;
        Ok(Self::with_client(client, config, proxy, prefer_proxy))
    }

    /// Use a preconfigured HTTP client.
    pub fn with_client(
        client: Client,
        config: UpstreamConfig,
        proxy: ProxyUrlBuilder,
        prefer_proxy: bool,
    ) -> Self {
        Self {
            client,
            config,
            proxy,
            prefer_proxy,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_base.trim_end_matches('/'), path)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &Query,
        timeout: Duration,
    ) -> Result<T, GatewayError> {
        let url = self.url(path);
        debug!("MangaDex GET {} {:?}", url, query);

        let response = http::send(self.client.get(&url).query(query), timeout).await?;
        let response = http::ensure_success(response).await?;
        http::json(response, timeout).await
    }

    /// Every chapter of a series in the configured language, following
    /// feed pagination.
    async fn feed(&self, series_id: &str) -> Result<Vec<Chapter>, GatewayError> {
        let path = format!("/manga/{}/feed", series_id);
        let mut chapters = Vec::new();
        let mut offset = 0;

        for _ in 0..MAX_FEED_PAGES {
            let query: Query = vec![
                ("limit", FEED_PAGE_SIZE.to_string()),
                ("offset", offset.to_string()),
                ("translatedLanguage[]", self.config.language.clone()),
                ("order[volume]", "asc".to_string()),
                ("order[chapter]", "asc".to_string()),
                ("includes[]", "scanlation_group".to_string()),
            ];
            let page: Collection<Chapter> = self.get(&path, &query, self.config.timeout()).await?;

            let received = page.data.len() as u64;
            chapters.extend(page.data);
            offset += received;

            if received == 0 || offset >= page.total {
                return Ok(chapters);
            }
        }

        warn!(
            "Feed for {} truncated at {} chapters",
            series_id,
            chapters.len()
        );
        Ok(chapters)
    }

    async fn series_title(&self, series_id: &str) -> Option<String> {
        let path = format!("/manga/{}", series_id);
        match self
            .get::<Entity<Manga>>(&path, &Vec::new(), TITLE_LOOKUP_TIMEOUT)
            .await
        {
            Ok(entity) => convert::pick_localized(&entity.data.attributes.title),
            Err(e) => {
                warn!("Series title lookup for {} failed: {}", series_id, e);
                None
            }
        }
    }
}

#[async_trait]
impl CatalogGateway for MangaDexGateway {
    async fn search(&self, query: &str, page: u32) -> Result<SearchPage, GatewayError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(SearchPage::empty());
        }

        let offset = page.max(1).saturating_sub(1) * SEARCH_PAGE_SIZE;
        let params: Query = vec![
            ("title", query.to_string()),
            ("limit", SEARCH_PAGE_SIZE.to_string()),
            ("offset", offset.to_string()),
            ("includes[]", "cover_art".to_string()),
        ];
        let collection: Collection<Manga> =
            self.get("/manga", &params, self.config.timeout()).await?;
        Ok(convert::search_page(collection, &self.config.covers_base))
    }

    async fn browse(&self, order: BrowseOrder, limit: u32) -> Result<SearchPage, GatewayError> {
        let order_key = format!("order[{}]", order.sort_key());
        let limit = limit.clamp(1, 100).to_string();
        let url = self.url("/manga");
        debug!("MangaDex browse {} limit={}", order_key, limit);

        // The order key is dynamic, so it cannot live in a `Query`.
        let request = self.client.get(&url).query(&[
            (order_key.as_str(), "desc"),
            ("limit", limit.as_str()),
            ("includes[]", "cover_art"),
        ]);
        let response = http::send(request, self.config.timeout()).await?;
        let response = http::ensure_success(response).await?;
        let collection: Collection<Manga> = http::json(response, self.config.timeout()).await?;
        Ok(convert::search_page(collection, &self.config.covers_base))
    }

    async fn series_details(&self, series_id: &str) -> Result<SeriesDetails, GatewayError> {
        let path = format!("/manga/{}", series_id);
        let query: Query = vec![
            ("includes[]", "author".to_string()),
            ("includes[]", "artist".to_string()),
            ("includes[]", "cover_art".to_string()),
        ];
        let manga: Entity<Manga> = self.get(&path, &query, self.config.timeout()).await?;
        let chapters = self.feed(series_id).await?;

        Ok(convert::series_details(
            &manga.data,
            &chapters,
            &self.config.covers_base,
        ))
    }

    async fn chapter_info(&self, chapter_id: &str) -> Result<ChapterInfo, GatewayError> {
        let path = format!("/chapter/{}", chapter_id);
        let query: Query = vec![
            ("includes[]", "manga".to_string()),
            ("includes[]", "scanlation_group".to_string()),
        ];
        let chapter: Entity<Chapter> = self
            .get(&path, &query, self.config.chapter_timeout())
            .await?;

        let series_title = match convert::chapter_series(&chapter.data) {
            (Some(series_id), None) => self.series_title(&series_id).await,
            _ => None,
        };

        Ok(convert::chapter_info(
            &chapter.data,
            series_title,
            &self.config.covers_base,
            &self.config.site_base,
        ))
    }

    async fn chapter_pages(
        &self,
        chapter_id: &str,
        data_saver: bool,
    ) -> Result<PageListing, GatewayError> {
        let path = format!("/at-home/server/{}", chapter_id);
        let server: AtHomeServer = self
            .get(&path, &Vec::new(), self.config.chapter_timeout())
            .await?;

        let direct_urls = convert::page_urls(&server, data_saver);
        debug!("Chapter {} has {} pages", chapter_id, direct_urls.len());

        Ok(PageListing {
            proxied_urls: Some(self.proxy.proxied_all(&direct_urls)),
            direct_urls,
            prefer_proxy: self.prefer_proxy,
            external_url: convert::external_chapter_url(&self.config.site_base, chapter_id),
        })
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
