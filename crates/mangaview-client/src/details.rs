//! Series details view model.

use serde::Serialize;

use mangaview_protocols::{ChapterSummary, SeriesDetails, VolumeGroup};

use crate::reader::ShareableLocation;

pub const NO_CHAPTERS: &str = "No chapters available.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChapterEntry {
    pub chapter_id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    /// Reader location for this chapter.
    pub read_link: String,
    /// Same chapter on the upstream site.
    pub external_link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VolumeSection {
    pub heading: String,
    pub chapters: Vec<ChapterEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailsView {
    pub title: String,
    pub author: String,
    pub status: String,
    pub demographic: String,
    pub description: String,
    /// Volume sections in upstream order.
    pub sections: Vec<VolumeSection>,
    /// Set instead of sections when the series has no chapters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<&'static str>,
}

impl DetailsView {
    /// `site_base` is the upstream site, e.g. `https://mangadex.org`.
    pub fn new(details: &SeriesDetails, site_base: &str) -> Self {
        let sections: Vec<VolumeSection> = details
            .chapters_by_volume
            .iter()
            .filter(|group| !group.chapters.is_empty())
            .map(|group| section(&details.id, group, site_base))
            .collect();

        Self {
            title: details.title.clone(),
            author: details.author_name.clone(),
            status: details.status_label.clone(),
            demographic: details.demographic_label.clone(),
            description: details.description.clone(),
            empty_message: sections.is_empty().then_some(NO_CHAPTERS),
            sections,
        }
    }
}

pub fn volume_heading(group: &VolumeGroup) -> String {
    if group.is_unnumbered() {
        "Chapters".to_string()
    } else {
        format!("Volume {}", group.volume)
    }
}

pub fn chapter_label(chapter: &ChapterSummary) -> String {
    if chapter.is_oneshot() {
        "Oneshot".to_string()
    } else {
        format!("Chapter {}", chapter.chapter)
    }
}

fn section(series_id: &str, group: &VolumeGroup, site_base: &str) -> VolumeSection {
    let site_base = site_base.trim_end_matches('/');
    VolumeSection {
        heading: volume_heading(group),
        chapters: group
            .chapters
            .iter()
            .map(|chapter| ChapterEntry {
                chapter_id: chapter.id.clone(),
                label: chapter_label(chapter),
                title: chapter.title.clone().filter(|t| !t.is_empty()),
                group_name: chapter.group_name.clone(),
                read_link: ShareableLocation::for_chapter(Some(series_id), &chapter.id)
                    .to_string(),
                external_link: format!("{}/chapter/{}", site_base, chapter.id),
            })
            .collect(),
    }
}
