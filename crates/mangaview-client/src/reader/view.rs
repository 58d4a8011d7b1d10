//! Reader view models.

use serde::Serialize;

use mangaview_protocols::{AddressForm, ChapterLoadError};

/// An action offered next to an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Affordance {
    RetryPage { page: usize },
    ToggleMethod,
    ExternalLink { url: String },
    ReloadChapter,
}

impl Affordance {
    pub fn label(&self) -> &'static str {
        match self {
            Self::RetryPage { .. } => "Retry Page",
            Self::ToggleMethod => "Try Different Method",
            Self::ExternalLink { .. } => "Read on MangaDex",
            Self::ReloadChapter => "Retry Loading",
        }
    }
}

/// Terminal error for one page: both addressing forms failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageErrorView {
    pub page: usize,
    pub message: String,
    pub affordances: Vec<Affordance>,
}

impl PageErrorView {
    pub fn new(page: usize, external_url: &str) -> Self {
        Self {
            page,
            message: format!(
                "Failed to load page {}. This might be due to CORS restrictions or API changes.",
                page
            ),
            affordances: vec![
                Affordance::RetryPage { page },
                Affordance::ToggleMethod,
                Affordance::ExternalLink {
                    url: external_url.to_string(),
                },
            ],
        }
    }
}

/// Fatal error for the whole reader view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChapterErrorView {
    pub message: String,
    pub affordances: Vec<Affordance>,
}

impl ChapterErrorView {
    pub fn new(error: &ChapterLoadError, external_url: Option<&str>) -> Self {
        let mut affordances = Vec::with_capacity(2);
        if let Some(url) = external_url {
            affordances.push(Affordance::ExternalLink {
                url: url.to_string(),
            });
        }
        affordances.push(Affordance::ReloadChapter);

        Self {
            message: format!("Failed to load chapter: {}", error),
            affordances,
        }
    }
}

/// What the page area shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PageView {
    Idle,
    Loading { page: usize, form: AddressForm },
    Displayed { page: usize, form: AddressForm },
    Failed(PageErrorView),
}

/// Everything a front end renders for the reader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReaderView {
    /// `"Page {n} / {N}"`.
    pub indicator: String,
    pub prev_disabled: bool,
    pub next_disabled: bool,
    pub page: PageView,
    /// Shareable location with the current `page` marker.
    pub location: String,
    pub external_url: String,
}

pub fn page_indicator(page: usize, page_count: usize) -> String {
    format!("Page {} / {}", page, page_count)
}
