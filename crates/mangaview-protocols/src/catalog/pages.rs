//! Chapter page listings.

use serde::{Deserialize, Serialize};

use crate::error::{ChapterLoadError, GatewayError};

/// Which of the two URL lists a page load uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressForm {
    /// Straight at the upstream image host.
    Direct,
    /// Through the image relay.
    Proxied,
}

impl AddressForm {
    /// The form selected by the proxy preference flag.
    pub fn preferred(use_proxy: bool) -> Self {
        if use_proxy { Self::Proxied } else { Self::Direct }
    }

    pub fn other(self) -> Self {
        match self {
            Self::Direct => Self::Proxied,
            Self::Proxied => Self::Direct,
        }
    }
}

impl std::fmt::Display for AddressForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Direct => write!(f, "direct"),
            Self::Proxied => write!(f, "proxied"),
        }
    }
}

/// Page listing as returned by a catalog gateway, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageListing {
    pub direct_urls: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxied_urls: Option<Vec<String>>,
    #[serde(default)]
    pub prefer_proxy: bool,
    pub external_url: String,
}

/// Validated page URLs for one chapter.
///
/// Both lists have the same length `N >= 1` and are index-aligned to pages
/// `1..=N`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChapterPageSet {
    direct_urls: Vec<String>,
    proxied_urls: Vec<String>,
    prefer_proxy: bool,
    external_fallback_url: String,
}

impl ChapterPageSet {
    /// Build a page set. A missing proxied list falls back to the direct one.
    pub fn new(
        direct_urls: Vec<String>,
        proxied_urls: Option<Vec<String>>,
        prefer_proxy: bool,
        external_fallback_url: impl Into<String>,
    ) -> Result<Self, ChapterLoadError> {
        if direct_urls.is_empty() {
            return Err(ChapterLoadError::NoPagesFound);
        }

        let proxied_urls = proxied_urls.unwrap_or_else(|| direct_urls.clone());
        if proxied_urls.len() != direct_urls.len() {
            return Err(GatewayError::InvalidResponse(format!(
                "mismatched page lists: {} direct, {} proxied",
                direct_urls.len(),
                proxied_urls.len()
            ))
            .into());
        }

        Ok(Self {
            direct_urls,
            proxied_urls,
            prefer_proxy,
            external_fallback_url: external_fallback_url.into(),
        })
    }

    /// Number of pages.
    pub fn len(&self) -> usize {
        self.direct_urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.direct_urls.is_empty()
    }

    pub fn prefer_proxy(&self) -> bool {
        self.prefer_proxy
    }

    pub fn external_fallback_url(&self) -> &str {
        &self.external_fallback_url
    }

    pub fn direct_urls(&self) -> &[String] {
        &self.direct_urls
    }

    pub fn proxied_urls(&self) -> &[String] {
        &self.proxied_urls
    }

    /// URL of 1-based `page` in the given form.
    pub fn url(&self, page: usize, form: AddressForm) -> Option<&str> {
        let index = page.checked_sub(1)?;
        let list = match form {
            AddressForm::Direct => &self.direct_urls,
            AddressForm::Proxied => &self.proxied_urls,
        };
        list.get(index).map(String::as_str)
    }
}

impl TryFrom<PageListing> for ChapterPageSet {
    type Error = ChapterLoadError;

    fn try_from(listing: PageListing) -> Result<Self, Self::Error> {
        Self::new(
            listing.direct_urls,
            listing.proxied_urls,
            listing.prefer_proxy,
            listing.external_url,
        )
    }
}

impl From<ChapterPageSet> for PageListing {
    fn from(set: ChapterPageSet) -> Self {
        Self {
            direct_urls: set.direct_urls,
            proxied_urls: Some(set.proxied_urls),
            prefer_proxy: set.prefer_proxy,
            external_url: set.external_fallback_url,
        }
    }
}

#[cfg(test)]
#[path = "pages_tests.rs"]
mod tests;
