//! Monitoring and health check handlers.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    /// Catalog responses currently held in the cache.
    pub cached_responses: usize,
}

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    state.cache.purge_expired();
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime().as_secs(),
        cached_responses: state.cache.len(),
    })
}

/// Liveness probe.
pub async fn liveness_probe() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "alive"
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{test_state, FakeGateway};
    use mangaview_config::RelayConfig;

    #[tokio::test]
    async fn test_liveness_probe() {
        let response = liveness_probe().await;
        assert_eq!(response.0["status"], "alive");
    }

    #[tokio::test]
    async fn test_health_reports_cache() {
        let state = test_state(Arc::new(FakeGateway::default()), RelayConfig::default());
        state.cache.insert("series:x", &1u32);
        let response = health_check(State(state)).await;
        assert_eq!(response.0.status, "healthy");
        assert_eq!(response.0.cached_responses, 1);
        assert_eq!(response.0.version, env!("CARGO_PKG_VERSION"));
    }
}
