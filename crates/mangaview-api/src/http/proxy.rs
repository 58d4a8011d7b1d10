//! Image relay.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, StatusCode},
    response::Response,
};
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use crate::error::ApiError;
use crate::state::AppState;

const IMAGE_ACCEPT: &str = "image/webp,image/*,*/*;q=0.8";
const DEFAULT_CONTENT_TYPE: &str = "image/jpeg";

#[derive(Debug, Deserialize)]
pub struct ProxyParams {
    pub url: Option<String>,
}

/// Whether `host` equals or is a subdomain of one of `allowed`.
/// An empty allowlist admits every host.
fn host_allowed(host: &str, allowed: &[String]) -> bool {
    if allowed.is_empty() {
        return true;
    }
    let host = host.to_ascii_lowercase();
    allowed.iter().any(|suffix| {
        let suffix = suffix.trim_start_matches('.').to_ascii_lowercase();
        host == suffix || host.ends_with(&format!(".{}", suffix))
    })
}

/// Parse and vet the image URL a client asked the relay to fetch.
fn validate_target(raw: &str, allowed: &[String]) -> Result<Url, ApiError> {
    let url = Url::parse(raw).map_err(|e| ApiError::InvalidInput(format!("Invalid URL: {}", e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ApiError::InvalidInput(format!(
            "Unsupported URL scheme: {}",
            url.scheme()
        )));
    }

    let host = url
        .host_str()
        .ok_or_else(|| ApiError::InvalidInput("URL has no host".to_string()))?;
    if !host_allowed(host, allowed) {
        return Err(ApiError::InvalidInput(format!("Host not allowed: {}", host)));
    }

    Ok(url)
}

pub async fn proxy_image(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ProxyParams>,
) -> Result<Response, ApiError> {
    let raw = params
        .url
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| ApiError::InvalidInput("Missing URL parameter".to_string()))?;
    let target = validate_target(&raw, &state.relay.allowed_image_hosts)?;
    debug!("Relaying image {}", target);

    let upstream = state
        .image_client
        .get(target.clone())
        .header(header::ACCEPT, IMAGE_ACCEPT)
        .header(header::REFERER, format!("{}/", state.site_base))
        .timeout(state.relay.image_timeout())
        .send()
        .await
        .map_err(|e| {
            warn!("Image fetch {} failed: {}", target, e);
            ApiError::ImageRelay(e.to_string())
        })?;

    let status = upstream.status();
    if !status.is_success() {
        warn!("Image host returned {} for {}", status, target);
        return Err(ApiError::ImageRelay(format!("upstream returned {}", status)));
    }

    let content_type = upstream
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .unwrap_or(DEFAULT_CONTENT_TYPE)
        .to_string();

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(
            header::CACHE_CONTROL,
            format!("public, max-age={}", state.relay.image_cache_max_age),
        )
        .body(Body::from_stream(upstream.bytes_stream()))
        .map_err(|e| ApiError::ImageRelay(e.to_string()))
}

#[cfg(test)]
#[path = "proxy_tests.rs"]
mod tests;
