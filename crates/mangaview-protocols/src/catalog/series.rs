//! Series, search and chapter metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Volume key for chapters that belong to no volume.
pub const NO_VOLUME: &str = "No Volume";

/// Chapter number used for oneshots.
pub const NO_CHAPTER: &str = "No Chapter";

/// Ordering used by the home-page listing sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrowseOrder {
    Popular,
    Recent,
    TopRated,
    Newest,
}

impl BrowseOrder {
    /// Upstream sort key for this ordering.
    pub fn sort_key(&self) -> &'static str {
        match self {
            Self::Popular => "followedCount",
            Self::Recent => "latestUploadedChapter",
            Self::TopRated => "rating",
            Self::Newest => "createdAt",
        }
    }

    pub fn all() -> [BrowseOrder; 4] {
        [Self::Popular, Self::Recent, Self::TopRated, Self::Newest]
    }
}

impl std::str::FromStr for BrowseOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "popular" | "followedCount" => Ok(Self::Popular),
            "recent" | "latestUploadedChapter" => Ok(Self::Recent),
            "top_rated" | "rating" => Ok(Self::TopRated),
            "newest" | "createdAt" => Ok(Self::Newest),
            other => Err(format!("unknown browse order: {}", other)),
        }
    }
}

/// One entry of a search or browse listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesSummary {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    pub items: Vec<SeriesSummary>,
    pub total_count: u64,
    #[serde(default)]
    pub offset: u64,
    #[serde(default)]
    pub limit: u64,
}

impl SearchPage {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
            offset: 0,
            limit: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A chapter as listed on the series details view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterSummary {
    pub id: String,
    /// Chapter number as published, or [`NO_CHAPTER`].
    pub chapter: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    #[serde(default)]
    pub language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_at: Option<DateTime<Utc>>,
}

impl ChapterSummary {
    pub fn is_oneshot(&self) -> bool {
        self.chapter == NO_CHAPTER
    }
}

/// Chapters of one volume, in upstream order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeGroup {
    /// Volume number as published, or [`NO_VOLUME`].
    pub volume: String,
    pub chapters: Vec<ChapterSummary>,
}

impl VolumeGroup {
    pub fn is_unnumbered(&self) -> bool {
        self.volume == NO_VOLUME
    }
}

/// Series metadata plus its chapter list grouped by volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesDetails {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_ref: Option<String>,
    pub author_name: String,
    pub status_label: String,
    pub demographic_label: String,
    pub description: String,
    #[serde(default)]
    pub chapters_by_volume: Vec<VolumeGroup>,
}

impl SeriesDetails {
    pub fn chapter_count(&self) -> usize {
        self.chapters_by_volume.iter().map(|v| v.chapters.len()).sum()
    }
}

/// Metadata for a single chapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterInfo {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chapter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<String>,
    pub language: String,
    pub pages: u32,
    pub group_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_at: Option<DateTime<Utc>>,
    pub external_url: String,
}

impl ChapterInfo {
    /// Heading for the reader: the chapter title, else "Chapter {n}".
    pub fn display_title(&self) -> String {
        match (&self.title, &self.chapter) {
            (Some(title), _) if !title.is_empty() => title.clone(),
            (_, Some(number)) => format!("Chapter {}", number),
            _ => "Chapter".to_string(),
        }
    }
}

#[cfg(test)]
#[path = "series_tests.rs"]
mod tests;
