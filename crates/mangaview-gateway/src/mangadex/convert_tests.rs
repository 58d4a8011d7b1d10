use super::*;
use crate::mangadex::api::{Entity, MangaAttributes};

const COVERS: &str = "https://uploads.mangadex.org";
const SITE: &str = "https://mangadex.org";

fn manga_json() -> serde_json::Value {
    serde_json::json!({
        "id": "801513ba-a712-498c-8f57-cae55b38cc92",
        "type": "manga",
        "attributes": {
            "title": {"en": "Berserk"},
            "description": {"en": "Guts, a former mercenary...", "fr": "Guts..."},
            "status": "ongoing",
            "publicationDemographic": "seinen",
            "year": 1989
        },
        "relationships": [
            {"id": "a1", "type": "author", "attributes": {"name": "Miura Kentarou"}},
            {"id": "a1", "type": "artist", "attributes": {"name": "Miura Kentarou"}},
            {"id": "c1", "type": "cover_art", "attributes": {"fileName": "cover.jpg", "volume": "1"}}
        ]
    })
}

fn chapter_json(id: &str, volume: Option<&str>, number: Option<&str>) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "type": "chapter",
        "attributes": {
            "volume": volume,
            "chapter": number,
            "title": null,
            "translatedLanguage": "en",
            "publishAt": "2018-02-24T14:18:38+00:00",
            "pages": 24
        },
        "relationships": [
            {"id": "g1", "type": "scanlation_group", "attributes": {"name": "Band of the Hawk"}},
            {"id": "801513ba-a712-498c-8f57-cae55b38cc92", "type": "manga"}
        ]
    })
}

fn manga() -> Manga {
    serde_json::from_value(manga_json()).unwrap()
}

fn chapter(id: &str, volume: Option<&str>, number: Option<&str>) -> Chapter {
    serde_json::from_value(chapter_json(id, volume, number)).unwrap()
}

#[test]
fn test_pick_localized_prefers_english() {
    let mut map = LocalizedString::new();
    map.insert("ja".to_string(), "ベルセルク".to_string());
    map.insert("en".to_string(), "Berserk".to_string());
    assert_eq!(pick_localized(&map), Some("Berserk".to_string()));
}

#[test]
fn test_pick_localized_falls_back_to_any() {
    let mut map = LocalizedString::new();
    map.insert("ja-ro".to_string(), "Shingeki no Kyojin".to_string());
    assert_eq!(pick_localized(&map), Some("Shingeki no Kyojin".to_string()));
    assert_eq!(pick_localized(&LocalizedString::new()), None);
}

#[test]
fn test_series_summary_with_cover() {
    let summary = series_summary(&manga(), COVERS);
    assert_eq!(summary.title, "Berserk");
    assert_eq!(
        summary.cover_url.as_deref(),
        Some("https://uploads.mangadex.org/covers/801513ba-a712-498c-8f57-cae55b38cc92/cover.jpg")
    );
}

#[test]
fn test_series_summary_without_title() {
    let manga = Manga {
        id: "x".to_string(),
        attributes: MangaAttributes::default(),
        relationships: Vec::new(),
    };
    let summary = series_summary(&manga, COVERS);
    assert_eq!(summary.title, "Unknown Title");
    assert!(summary.cover_url.is_none());
}

#[test]
fn test_search_page_from_collection() {
    let collection: Collection<Manga> = serde_json::from_value(serde_json::json!({
        "result": "ok",
        "response": "collection",
        "data": [manga_json()],
        "limit": 20,
        "offset": 40,
        "total": 123
    }))
    .unwrap();
    let page = search_page(collection, COVERS);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.total_count, 123);
    assert_eq!(page.offset, 40);
    assert_eq!(page.limit, 20);
}

#[test]
fn test_series_details_labels() {
    let details = series_details(&manga(), &[], COVERS);
    assert_eq!(details.author_name, "Miura Kentarou");
    assert_eq!(details.status_label, "ongoing");
    assert_eq!(details.demographic_label, "seinen");
    assert_eq!(details.description, "Guts, a former mercenary...");
    assert!(details.chapters_by_volume.is_empty());
}

#[test]
fn test_series_details_defaults() {
    let manga: Manga = serde_json::from_value(serde_json::json!({
        "id": "x",
        "attributes": {"title": {"en": "T"}, "description": {}},
        "relationships": []
    }))
    .unwrap();
    let details = series_details(&manga, &[], COVERS);
    assert_eq!(details.author_name, "Unknown");
    assert_eq!(details.status_label, "Unknown");
    assert_eq!(details.demographic_label, "Unknown");
    assert_eq!(details.description, "No description.");
}

#[test]
fn test_group_by_volume_keeps_feed_order() {
    let chapters = vec![
        chapter("c1", Some("1"), Some("1")),
        chapter("c2", Some("1"), Some("2")),
        chapter("c3", Some("2"), Some("3")),
        chapter("c4", None, Some("4")),
        chapter("c5", Some("1"), Some("2.5")),
    ];
    let groups = group_by_volume(&chapters);
    let volumes: Vec<_> = groups.iter().map(|g| g.volume.as_str()).collect();
    assert_eq!(volumes, vec!["1", "2", NO_VOLUME]);
    let first: Vec<_> = groups[0].chapters.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(first, vec!["c1", "c2", "c5"]);
}

#[test]
fn test_chapter_summary_oneshot() {
    let summary = chapter_summary(&chapter("c1", None, None));
    assert_eq!(summary.chapter, NO_CHAPTER);
    assert_eq!(summary.group_name.as_deref(), Some("Band of the Hawk"));
    assert_eq!(summary.language, "en");
    assert!(summary.publish_at.is_some());
}

#[test]
fn test_chapter_info_fields() {
    let info = chapter_info(&chapter("c9", Some("3"), Some("17")), None, COVERS, SITE);
    assert_eq!(info.series_id.as_deref(), Some("801513ba-a712-498c-8f57-cae55b38cc92"));
    assert_eq!(info.series_title, None);
    assert_eq!(info.pages, 24);
    assert_eq!(info.group_name, "Band of the Hawk");
    assert_eq!(info.external_url, "https://mangadex.org/chapter/c9");
    assert_eq!(info.display_title(), "Chapter 17");
}

#[test]
fn test_chapter_info_uses_embedded_title() {
    let chapter: Chapter = serde_json::from_value(serde_json::json!({
        "id": "c1",
        "attributes": {"pages": 3},
        "relationships": [
            {"id": "m1", "type": "manga", "attributes": {"title": {"en": "Vagabond"}}}
        ]
    }))
    .unwrap();
    let (series_id, title) = chapter_series(&chapter);
    assert_eq!(series_id.as_deref(), Some("m1"));
    assert_eq!(title.as_deref(), Some("Vagabond"));

    let info = chapter_info(&chapter, None, COVERS, SITE);
    assert_eq!(info.series_title.as_deref(), Some("Vagabond"));
    assert_eq!(info.group_name, "Unknown Group");
    assert_eq!(info.language, "unknown");
}

#[test]
fn test_chapter_info_prefers_looked_up_title() {
    let info = chapter_info(
        &chapter("c1", None, Some("1")),
        Some("Looked Up".to_string()),
        COVERS,
        SITE,
    );
    assert_eq!(info.series_title.as_deref(), Some("Looked Up"));
}

fn at_home(data_saver: Vec<&str>) -> AtHomeServer {
    serde_json::from_value(serde_json::json!({
        "result": "ok",
        "baseUrl": "https://cmdxd98sb0x3yprd.mangadex.network/",
        "chapter": {
            "hash": "3303dd03ac8d27452cce3f2a882e94b2",
            "data": ["1-f7a76de1.png", "2-e0cd8a3c.png"],
            "dataSaver": data_saver
        }
    }))
    .unwrap()
}

#[test]
fn test_page_urls_full_quality() {
    let urls = page_urls(&at_home(vec!["1-a.jpg", "2-b.jpg"]), false);
    assert_eq!(
        urls,
        vec![
            "https://cmdxd98sb0x3yprd.mangadex.network/data/3303dd03ac8d27452cce3f2a882e94b2/1-f7a76de1.png",
            "https://cmdxd98sb0x3yprd.mangadex.network/data/3303dd03ac8d27452cce3f2a882e94b2/2-e0cd8a3c.png",
        ]
    );
}

#[test]
fn test_page_urls_data_saver() {
    let urls = page_urls(&at_home(vec!["1-a.jpg", "2-b.jpg"]), true);
    assert!(urls[0].contains("/data-saver/"));
    assert!(urls[1].ends_with("2-b.jpg"));
}

#[test]
fn test_page_urls_data_saver_missing_falls_back() {
    let urls = page_urls(&at_home(vec![]), true);
    assert_eq!(urls.len(), 2);
    assert!(urls[0].contains("/data/"));
}

#[test]
fn test_entity_wrapper() {
    let entity: Entity<Manga> =
        serde_json::from_value(serde_json::json!({"result": "ok", "data": manga_json()})).unwrap();
    assert_eq!(entity.data.attributes.status.as_deref(), Some("ongoing"));
}
