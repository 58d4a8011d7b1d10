use super::*;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SERIES_ID: &str = "801513ba-a712-498c-8f57-cae55b38cc92";
const CHAPTER_ID: &str = "a54c491c-8e4c-4e97-8873-5b79e59da210";

fn gateway(server: &MockServer) -> MangaDexGateway {
    let config = UpstreamConfig {
        api_base: server.uri(),
        ..Default::default()
    };
    MangaDexGateway::new(config, ProxyUrlBuilder::default(), true).unwrap()
}

fn manga_body(title: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "id": SERIES_ID,
        "type": "manga",
        "attributes": {
            "title": title,
            "description": {"en": "Dark fantasy."},
            "status": "hiatus",
            "publicationDemographic": "seinen"
        },
        "relationships": [
            {"id": "a1", "type": "author", "attributes": {"name": "Miura Kentarou"}},
            {"id": "c1", "type": "cover_art", "attributes": {"fileName": "b.jpg"}}
        ]
    })
}

fn feed_chapter(id: &str, volume: &str, number: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "type": "chapter",
        "attributes": {
            "volume": volume,
            "chapter": number,
            "translatedLanguage": "en",
            "pages": 20
        },
        "relationships": []
    })
}

#[tokio::test]
async fn test_search_requests_second_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/manga"))
        .and(query_param("title", "berserk"))
        .and(query_param("limit", "20"))
        .and(query_param("offset", "20"))
        .and(query_param("includes[]", "cover_art"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": "ok",
            "data": [manga_body(serde_json::json!({"en": "Berserk"}))],
            "limit": 20,
            "offset": 20,
            "total": 21
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = gateway(&server).search("berserk", 2).await.unwrap();
    assert_eq!(page.total_count, 21);
    assert_eq!(page.items[0].title, "Berserk");
    assert!(page.items[0].cover_url.as_deref().unwrap().ends_with("/b.jpg"));
}

#[tokio::test]
async fn test_blank_search_skips_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let page = gateway(&server).search("   ", 1).await.unwrap();
    assert!(page.is_empty());
}

#[tokio::test]
async fn test_browse_uses_order_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/manga"))
        .and(query_param("order[followedCount]", "desc"))
        .and(query_param("limit", "12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [],
            "limit": 12,
            "offset": 0,
            "total": 0
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = gateway(&server)
        .browse(BrowseOrder::Popular, 12)
        .await
        .unwrap();
    assert!(page.items.is_empty());
}

#[tokio::test]
async fn test_series_details_follows_feed_pages() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/manga/{}", SERIES_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": manga_body(serde_json::json!({"en": "Berserk"}))
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/manga/{}/feed", SERIES_ID)))
        .and(query_param("offset", "0"))
        .and(query_param("translatedLanguage[]", "en"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [feed_chapter("c1", "1", "1"), feed_chapter("c2", "1", "2")],
            "limit": 500,
            "offset": 0,
            "total": 3
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/manga/{}/feed", SERIES_ID)))
        .and(query_param("offset", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [feed_chapter("c3", "2", "3")],
            "limit": 500,
            "offset": 2,
            "total": 3
        })))
        .expect(1)
        .mount(&server)
        .await;

    let details = gateway(&server).series_details(SERIES_ID).await.unwrap();
    assert_eq!(details.title, "Berserk");
    assert_eq!(details.status_label, "hiatus");
    assert_eq!(details.chapter_count(), 3);
    assert_eq!(details.chapters_by_volume.len(), 2);
    assert_eq!(details.chapters_by_volume[1].volume, "2");
}

#[tokio::test]
async fn test_series_details_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("{\"result\":\"error\"}"))
        .mount(&server)
        .await;

    let err = gateway(&server).series_details(SERIES_ID).await.unwrap_err();
    assert!(matches!(err, GatewayError::NotFound(_)));
}

#[tokio::test]
async fn test_chapter_info_looks_up_missing_title() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/chapter/{}", CHAPTER_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {
                "id": CHAPTER_ID,
                "attributes": {"chapter": "12", "volume": "3", "pages": 18},
                "relationships": [{"id": SERIES_ID, "type": "manga"}]
            }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/manga/{}", SERIES_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": manga_body(serde_json::json!({"ja": "ベルセルク"}))
        })))
        .expect(1)
        .mount(&server)
        .await;

    let info = gateway(&server).chapter_info(CHAPTER_ID).await.unwrap();
    assert_eq!(info.series_title.as_deref(), Some("ベルセルク"));
    assert_eq!(info.pages, 18);
    assert_eq!(
        info.external_url,
        format!("https://mangadex.org/chapter/{}", CHAPTER_ID)
    );
}

#[tokio::test]
async fn test_chapter_info_ignores_failed_title_lookup() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/chapter/{}", CHAPTER_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {
                "id": CHAPTER_ID,
                "attributes": {"chapter": "12", "pages": 18},
                "relationships": [{"id": SERIES_ID, "type": "manga"}]
            }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/manga/{}", SERIES_ID)))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let info = gateway(&server).chapter_info(CHAPTER_ID).await.unwrap();
    assert_eq!(info.series_id.as_deref(), Some(SERIES_ID));
    assert!(info.series_title.is_none());
}

#[tokio::test]
async fn test_chapter_pages_builds_both_forms() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/at-home/server/{}", CHAPTER_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": "ok",
            "baseUrl": "https://node.mangadex.network",
            "chapter": {
                "hash": "h1",
                "data": ["1.png", "2.png"],
                "dataSaver": ["1.jpg", "2.jpg"]
            }
        })))
        .mount(&server)
        .await;

    let listing = gateway(&server)
        .chapter_pages(CHAPTER_ID, true)
        .await
        .unwrap();
    assert_eq!(
        listing.direct_urls,
        vec![
            "https://node.mangadex.network/data-saver/h1/1.jpg",
            "https://node.mangadex.network/data-saver/h1/2.jpg",
        ]
    );
    let proxied = listing.proxied_urls.unwrap();
    assert_eq!(proxied.len(), 2);
    assert!(proxied[0].starts_with("/api/proxy-image?url=https%3A%2F%2Fnode"));
    assert!(listing.prefer_proxy);
    assert!(listing.external_url.ends_with(CHAPTER_ID));
}

#[tokio::test]
async fn test_chapter_pages_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = gateway(&server)
        .chapter_pages(CHAPTER_ID, false)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        GatewayError::Upstream {
            status: 500,
            message: "boom".to_string()
        }
    );
}

#[tokio::test]
async fn test_malformed_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let err = gateway(&server).search("x", 1).await.unwrap_err();
    assert!(matches!(err, GatewayError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_non_ascii_error_body_is_truncated_safely() {
    let server = MockServer::start().await;
    let body = format!("{}{}", "x".repeat(511), "漫画エラー");
    Mock::given(method("GET"))
        .and(path(format!("/manga/{}", SERIES_ID)))
        .respond_with(ResponseTemplate::new(503).set_body_string(body))
        .mount(&server)
        .await;

    let err = gateway(&server).series_details(SERIES_ID).await.unwrap_err();
    assert!(matches!(err, GatewayError::Upstream { status: 503, .. }));
}
