//! Test doubles shared by the relay tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;

use mangaview_config::RelayConfig;
use mangaview_protocols::{
    BrowseOrder, CatalogGateway, ChapterInfo, GatewayError, PageListing, SearchPage,
    SeriesDetails, SeriesSummary, VolumeGroup,
};

use crate::state::AppState;

pub(crate) const SERIES_ID: &str = "801513ba-a712-498c-8f57-cae55b38cc92";
pub(crate) const CHAPTER_ID: &str = "a54c491c-8e4c-4e97-8873-5b79e59da210";

#[derive(Default)]
pub(crate) struct FakeGateway {
    pub fail_with: Option<GatewayError>,
    pub page_count: usize,
    pub calls: AtomicUsize,
}

impl FakeGateway {
    pub fn failing(error: GatewayError) -> Self {
        Self {
            fail_with: Some(error),
            ..Default::default()
        }
    }

    pub fn with_pages(page_count: usize) -> Self {
        Self {
            page_count,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn enter(&self) -> Result<(), GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.fail_with {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl CatalogGateway for FakeGateway {
    async fn search(&self, query: &str, page: u32) -> Result<SearchPage, GatewayError> {
        self.enter()?;
        Ok(SearchPage {
            items: vec![SeriesSummary {
                id: SERIES_ID.to_string(),
                title: query.to_string(),
                cover_url: None,
            }],
            total_count: 45,
            offset: u64::from(page.saturating_sub(1)) * 20,
            limit: 20,
        })
    }

    async fn browse(&self, _order: BrowseOrder, limit: u32) -> Result<SearchPage, GatewayError> {
        self.enter()?;
        Ok(SearchPage {
            items: Vec::new(),
            total_count: 0,
            offset: 0,
            limit: u64::from(limit),
        })
    }

    async fn series_details(&self, series_id: &str) -> Result<SeriesDetails, GatewayError> {
        self.enter()?;
        Ok(SeriesDetails {
            id: series_id.to_string(),
            title: "Berserk".to_string(),
            cover_ref: None,
            author_name: "Miura Kentarou".to_string(),
            status_label: "ongoing".to_string(),
            demographic_label: "seinen".to_string(),
            description: "No description.".to_string(),
            chapters_by_volume: Vec::<VolumeGroup>::new(),
        })
    }

    async fn chapter_info(&self, chapter_id: &str) -> Result<ChapterInfo, GatewayError> {
        self.enter()?;
        Ok(ChapterInfo {
            id: chapter_id.to_string(),
            series_id: Some(SERIES_ID.to_string()),
            series_title: Some("Berserk".to_string()),
            title: None,
            chapter: Some("1".to_string()),
            volume: None,
            language: "en".to_string(),
            pages: self.page_count as u32,
            group_name: "Unknown Group".to_string(),
            cover_url: None,
            publish_at: None,
            external_url: format!("https://mangadex.org/chapter/{}", chapter_id),
        })
    }

    async fn chapter_pages(
        &self,
        chapter_id: &str,
        _data_saver: bool,
    ) -> Result<PageListing, GatewayError> {
        self.enter()?;
        let direct_urls: Vec<String> = (1..=self.page_count)
            .map(|n| format!("https://node.mangadex.network/data/h/{}.jpg", n))
            .collect();
        Ok(PageListing {
            proxied_urls: Some(
                direct_urls
                    .iter()
                    .map(|u| format!("/api/proxy-image?url={}", u))
                    .collect(),
            ),
            direct_urls,
            prefer_proxy: true,
            external_url: format!("https://mangadex.org/chapter/{}", chapter_id),
        })
    }
}

pub(crate) fn test_state(gateway: Arc<FakeGateway>, relay: RelayConfig) -> Arc<AppState> {
    Arc::new(AppState::new(
        gateway,
        Client::new(),
        relay,
        "https://mangadex.org",
    ))
}
