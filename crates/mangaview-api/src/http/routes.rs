//! HTTP route definitions.

use std::sync::Arc;

use axum::{http::Method, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::{catalog, monitoring, proxy};
use crate::state::AppState;

/// Create the relay router.
///
/// ```text
/// /api
///   GET /api/search?query=&page=          - Search series
///   GET /api/browse?order=&limit=         - Listing sections
///   GET /api/series/{id}                  - Series details
///   GET /api/chapter/{id}                 - Chapter metadata
///   GET /api/chapter/{id}/pages?dataSaver= - Chapter page listing
///   GET /api/proxy-image?url=             - Image relay
///
/// /health - Health check
/// /livez  - Liveness probe
/// ```
pub fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route("/search", get(catalog::search))
        .route("/browse", get(catalog::browse))
        .route("/series/{id}", get(catalog::series_details))
        .route("/chapter/{id}", get(catalog::chapter_info))
        .route("/chapter/{id}/pages", get(catalog::chapter_pages))
        .route("/proxy-image", get(proxy::proxy_image))
        .with_state(state.clone());

    let monitoring_routes = Router::new()
        .route("/health", get(monitoring::health_check))
        .with_state(state);

    // Liveness probe has no state dependency
    let liveness_route = Router::new().route("/livez", get(monitoring::liveness_probe));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .nest("/api", api_routes)
        .merge(monitoring_routes)
        .merge(liveness_route)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
