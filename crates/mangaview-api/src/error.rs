//! Relay error types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use mangaview_protocols::{Envelope, GatewayError};

/// Errors returned by relay handlers. Every variant renders as an
/// `{"error": ...}` envelope.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed request parameters.
    #[error("{0}")]
    InvalidInput(String),

    /// Catalog gateway failure.
    #[error("{0}")]
    Gateway(#[from] GatewayError),

    /// Catalog gateway failure for a chapter, with the external reader link.
    #[error("{source}")]
    Chapter {
        #[source]
        source: GatewayError,
        external_url: String,
    },

    /// Image host unreachable or rejected the request.
    #[error("Failed to proxy image: {0}")]
    ImageRelay(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::Gateway(e) | Self::Chapter { source: e, .. } => match e {
                GatewayError::NotFound(_) => StatusCode::NOT_FOUND,
                GatewayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::BAD_GATEWAY,
            },
            Self::ImageRelay(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let envelope = match &self {
            Self::Chapter { external_url, .. } => {
                Envelope::<()>::err(self.to_string()).with_external_url(external_url.clone())
            }
            _ => Envelope::<()>::err(self.to_string()),
        };
        (status, Json(envelope)).into_response()
    }
}
