//! MangaDex API response types.
//!
//! Only the fields MangaView reads are declared; everything else is ignored.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Localised string map, e.g. `{"en": "Berserk", "ja": "ベルセルク"}`.
pub(crate) type LocalizedString = BTreeMap<String, String>;

#[derive(Debug, Deserialize)]
pub(crate) struct Collection<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Entity<T> {
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Manga {
    pub id: String,
    pub attributes: MangaAttributes,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct MangaAttributes {
    pub title: LocalizedString,
    pub description: LocalizedString,
    pub status: Option<String>,
    pub publication_demographic: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Chapter {
    pub id: String,
    pub attributes: ChapterAttributes,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct ChapterAttributes {
    pub volume: Option<String>,
    pub chapter: Option<String>,
    pub title: Option<String>,
    pub translated_language: Option<String>,
    pub publish_at: Option<DateTime<Utc>>,
    pub pages: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Relationship {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub attributes: Option<RelationshipAttributes>,
}

/// Union of the attribute fields of the related types MangaView expands
/// (author, artist, cover_art, scanlation_group, manga).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct RelationshipAttributes {
    pub name: Option<String>,
    pub file_name: Option<String>,
    pub title: Option<LocalizedString>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AtHomeServer {
    pub base_url: String,
    pub chapter: AtHomeChapter,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AtHomeChapter {
    pub hash: String,
    #[serde(default)]
    pub data: Vec<String>,
    #[serde(default)]
    pub data_saver: Vec<String>,
}
