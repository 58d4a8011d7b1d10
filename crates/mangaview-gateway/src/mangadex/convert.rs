//! Conversion from MangaDex responses to catalog types.

use mangaview_protocols::{
    ChapterInfo, ChapterSummary, SearchPage, SeriesDetails, SeriesSummary, VolumeGroup,
    NO_CHAPTER, NO_VOLUME,
};

use super::api::{AtHomeServer, Chapter, Collection, LocalizedString, Manga, Relationship};

const UNKNOWN: &str = "Unknown";
const UNKNOWN_TITLE: &str = "Unknown Title";
const UNKNOWN_GROUP: &str = "Unknown Group";
const NO_DESCRIPTION: &str = "No description.";

/// English entry if present, otherwise the first one.
pub(crate) fn pick_localized(map: &LocalizedString) -> Option<String> {
    map.get("en")
        .or_else(|| map.values().next())
        .filter(|s| !s.is_empty())
        .cloned()
}

fn related<'a>(relationships: &'a [Relationship], kind: &str) -> Option<&'a Relationship> {
    relationships.iter().find(|r| r.kind == kind)
}

pub(crate) fn cover_url(
    covers_base: &str,
    series_id: &str,
    relationships: &[Relationship],
) -> Option<String> {
    related(relationships, "cover_art")
        .and_then(|r| r.attributes.as_ref())
        .and_then(|a| a.file_name.as_deref())
        .map(|file| format!("{}/covers/{}/{}", covers_base.trim_end_matches('/'), series_id, file))
}

pub(crate) fn external_chapter_url(site_base: &str, chapter_id: &str) -> String {
    format!("{}/chapter/{}", site_base.trim_end_matches('/'), chapter_id)
}

pub(crate) fn series_summary(manga: &Manga, covers_base: &str) -> SeriesSummary {
    SeriesSummary {
        id: manga.id.clone(),
        title: pick_localized(&manga.attributes.title).unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
        cover_url: cover_url(covers_base, &manga.id, &manga.relationships),
    }
}

pub(crate) fn search_page(collection: Collection<Manga>, covers_base: &str) -> SearchPage {
    SearchPage {
        items: collection
            .data
            .iter()
            .map(|m| series_summary(m, covers_base))
            .collect(),
        total_count: collection.total,
        offset: collection.offset,
        limit: collection.limit,
    }
}

pub(crate) fn chapter_summary(chapter: &Chapter) -> ChapterSummary {
    let attrs = &chapter.attributes;
    ChapterSummary {
        id: chapter.id.clone(),
        chapter: attrs
            .chapter
            .clone()
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| NO_CHAPTER.to_string()),
        title: attrs.title.clone().filter(|t| !t.is_empty()),
        group_name: related(&chapter.relationships, "scanlation_group")
            .and_then(|r| r.attributes.as_ref())
            .and_then(|a| a.name.clone()),
        language: attrs.translated_language.clone().unwrap_or_default(),
        publish_at: attrs.publish_at,
    }
}

/// Group chapters by volume, keeping the order in which volumes first
/// appear in the feed.
pub(crate) fn group_by_volume(chapters: &[Chapter]) -> Vec<VolumeGroup> {
    let mut groups: Vec<VolumeGroup> = Vec::new();

    for chapter in chapters {
        let volume = chapter
            .attributes
            .volume
            .clone()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| NO_VOLUME.to_string());

        match groups.iter_mut().find(|g| g.volume == volume) {
            Some(group) => group.chapters.push(chapter_summary(chapter)),
            None => groups.push(VolumeGroup {
                volume,
                chapters: vec![chapter_summary(chapter)],
            }),
        }
    }

    groups
}

pub(crate) fn series_details(manga: &Manga, chapters: &[Chapter], covers_base: &str) -> SeriesDetails {
    let attrs = &manga.attributes;
    SeriesDetails {
        id: manga.id.clone(),
        title: pick_localized(&attrs.title).unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
        cover_ref: cover_url(covers_base, &manga.id, &manga.relationships),
        author_name: related(&manga.relationships, "author")
            .and_then(|r| r.attributes.as_ref())
            .and_then(|a| a.name.clone())
            .unwrap_or_else(|| UNKNOWN.to_string()),
        status_label: attrs.status.clone().unwrap_or_else(|| UNKNOWN.to_string()),
        demographic_label: attrs
            .publication_demographic
            .clone()
            .unwrap_or_else(|| UNKNOWN.to_string()),
        description: attrs
            .description
            .get("en")
            .filter(|d| !d.is_empty())
            .cloned()
            .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        chapters_by_volume: group_by_volume(chapters),
    }
}

/// Series id and embedded title of a chapter's manga relationship.
pub(crate) fn chapter_series(chapter: &Chapter) -> (Option<String>, Option<String>) {
    match related(&chapter.relationships, "manga") {
        Some(rel) => (
            Some(rel.id.clone()),
            rel.attributes
                .as_ref()
                .and_then(|a| a.title.as_ref())
                .and_then(pick_localized),
        ),
        None => (None, None),
    }
}

pub(crate) fn chapter_info(
    chapter: &Chapter,
    series_title: Option<String>,
    covers_base: &str,
    site_base: &str,
) -> ChapterInfo {
    let attrs = &chapter.attributes;
    let (series_id, embedded_title) = chapter_series(chapter);
    let cover_url = series_id
        .as_deref()
        .and_then(|id| cover_url(covers_base, id, &chapter.relationships));

    ChapterInfo {
        id: chapter.id.clone(),
        series_title: series_title.or(embedded_title),
        series_id,
        title: attrs.title.clone().filter(|t| !t.is_empty()),
        chapter: attrs.chapter.clone(),
        volume: attrs.volume.clone(),
        language: attrs
            .translated_language
            .clone()
            .unwrap_or_else(|| "unknown".to_string()),
        pages: attrs.pages,
        group_name: related(&chapter.relationships, "scanlation_group")
            .and_then(|r| r.attributes.as_ref())
            .and_then(|a| a.name.clone())
            .unwrap_or_else(|| UNKNOWN_GROUP.to_string()),
        cover_url,
        publish_at: attrs.publish_at,
        external_url: external_chapter_url(site_base, &chapter.id),
    }
}

/// Direct page URLs from an at-home server response.
pub(crate) fn page_urls(server: &AtHomeServer, data_saver: bool) -> Vec<String> {
    let base = server.base_url.trim_end_matches('/');
    let hash = &server.chapter.hash;

    // Some chapters have no data-saver renditions.
    let (segment, files) = if data_saver && !server.chapter.data_saver.is_empty() {
        ("data-saver", &server.chapter.data_saver)
    } else {
        ("data", &server.chapter.data)
    };

    files
        .iter()
        .map(|file| format!("{}/{}/{}/{}", base, segment, hash, file))
        .collect()
}

#[cfg(test)]
#[path = "convert_tests.rs"]
mod tests;
