//! Catalog endpoints.

use std::future::Future;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use mangaview_protocols::{
    BrowseOrder, ChapterInfo, Envelope, GatewayError, PageListing, SearchPage, SeriesDetails,
};

use crate::error::ApiError;
use crate::state::AppState;

const DEFAULT_BROWSE_LIMIT: u32 = 12;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub query: String,
    pub page: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BrowseParams {
    pub order: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PagesParams {
    #[serde(rename = "dataSaver")]
    pub data_saver: Option<String>,
}

/// Lenient numeric parameter: anything unparsable falls back to `default`.
fn number_or(value: Option<&str>, default: u32) -> u32 {
    value
        .and_then(|v| v.trim().parse().ok())
        .filter(|n| *n > 0)
        .unwrap_or(default)
}

fn validate_id(id: &str, kind: &str) -> Result<(), ApiError> {
    Uuid::parse_str(id)
        .map(|_| ())
        .map_err(|_| ApiError::InvalidInput(format!("Invalid {} id: {}", kind, id)))
}

/// Serve from the response cache, filling it on success.
async fn cached<T, F, Fut>(state: &AppState, key: String, fetch: F) -> Result<T, GatewayError>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, GatewayError>>,
{
    if let Some(hit) = state.cache.get::<T>(&key) {
        debug!("Cache hit: {}", key);
        return Ok(hit);
    }

    let value = fetch().await?;
    state.cache.insert(key, &value);
    Ok(value)
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Envelope<SearchPage>>, ApiError> {
    let page = number_or(params.page.as_deref(), 1);
    let result = state
        .gateway
        .search(&params.query, page)
        .await
        .inspect_err(|e| warn!("Search '{}' failed: {}", params.query, e))?;
    Ok(Json(Envelope::ok(result)))
}

pub async fn browse(
    State(state): State<Arc<AppState>>,
    Query(params): Query<BrowseParams>,
) -> Result<Json<Envelope<SearchPage>>, ApiError> {
    let order = match params.order.as_deref() {
        Some(raw) => raw.parse::<BrowseOrder>().map_err(ApiError::InvalidInput)?,
        None => BrowseOrder::Popular,
    };
    let limit = number_or(params.limit.as_deref(), DEFAULT_BROWSE_LIMIT).min(100);

    let key = format!("browse:{}:{}", order.sort_key(), limit);
    let gateway = state.gateway.clone();
    let result = cached(&state, key, || async move { gateway.browse(order, limit).await })
        .await
        .inspect_err(|e| warn!("Browse {:?} failed: {}", order, e))?;
    Ok(Json(Envelope::ok(result)))
}

pub async fn series_details(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<SeriesDetails>>, ApiError> {
    validate_id(&id, "series")?;

    let gateway = state.gateway.clone();
    let series_id = id.clone();
    let details = cached(&state, format!("series:{}", id), || async move {
        gateway.series_details(&series_id).await
    })
    .await
    .inspect_err(|e| warn!("Series {} failed: {}", id, e))?;
    Ok(Json(Envelope::ok(details)))
}

pub async fn chapter_info(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<ChapterInfo>>, ApiError> {
    validate_id(&id, "chapter")?;

    let gateway = state.gateway.clone();
    let chapter_id = id.clone();
    let info = cached(&state, format!("chapter:{}", id), || async move {
        gateway.chapter_info(&chapter_id).await
    })
    .await
    .map_err(|source| {
        warn!("Chapter {} failed: {}", id, source);
        ApiError::Chapter {
            source,
            external_url: state.external_chapter_url(&id),
        }
    })?;
    Ok(Json(Envelope::ok(info)))
}

pub async fn chapter_pages(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<PagesParams>,
) -> Result<Json<Envelope<PageListing>>, ApiError> {
    validate_id(&id, "chapter")?;
    let data_saver = params.data_saver.as_deref() != Some("false");
    let key = format!("pages:{}:{}", id, data_saver);

    // Empty listings are passed through uncached; the reader reports them.
    let listing = match state.cache.get::<PageListing>(&key) {
        Some(hit) => hit,
        None => {
            let listing = state
                .gateway
                .chapter_pages(&id, data_saver)
                .await
                .map_err(|source| {
                    warn!("Pages for chapter {} failed: {}", id, source);
                    ApiError::Chapter {
                        source,
                        external_url: state.external_chapter_url(&id),
                    }
                })?;
            if !listing.direct_urls.is_empty() {
                state.cache.insert(key, &listing);
            }
            listing
        }
    };

    Ok(Json(Envelope::ok(listing)))
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
