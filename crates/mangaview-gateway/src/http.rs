//! Shared request plumbing for the gateway clients.

use std::time::Duration;

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use mangaview_protocols::GatewayError;

/// Maximum length of an upstream error body carried into an error message.
const MAX_ERROR_BODY: usize = 512;

/// Send a request with a timeout and classify transport failures.
pub(crate) async fn send(
    request: RequestBuilder,
    timeout: Duration,
) -> Result<Response, GatewayError> {
    request
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| classify(e, timeout))
}

/// Turn a non-success status into a [`GatewayError`].
pub(crate) async fn ensure_success(response: Response) -> Result<Response, GatewayError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().to_string();
    let mut text = response.text().await.unwrap_or_default();
    truncate_error_body(&mut text);

    match status {
        StatusCode::NOT_FOUND => Err(GatewayError::NotFound(url)),
        StatusCode::BAD_REQUEST => Err(GatewayError::InvalidRequest(text)),
        _ => Err(GatewayError::Upstream {
            status: status.as_u16(),
            message: text,
        }),
    }
}

/// Cap an upstream error body at [`MAX_ERROR_BODY`] bytes, cutting on a
/// char boundary.
pub(crate) fn truncate_error_body(text: &mut String) {
    if text.len() <= MAX_ERROR_BODY {
        return;
    }
    let mut end = MAX_ERROR_BODY;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text.truncate(end);
}

/// Decode a JSON body.
pub(crate) async fn json<T: DeserializeOwned>(
    response: Response,
    timeout: Duration,
) -> Result<T, GatewayError> {
    let bytes = response.bytes().await.map_err(|e| classify(e, timeout))?;
    serde_json::from_slice(&bytes).map_err(|e| GatewayError::InvalidResponse(e.to_string()))
}

pub(crate) fn classify(error: reqwest::Error, timeout: Duration) -> GatewayError {
    if error.is_timeout() {
        GatewayError::Timeout(timeout.as_secs())
    } else if error.is_decode() {
        GatewayError::InvalidResponse(error.to_string())
    } else {
        GatewayError::Network(error.to_string())
    }
}
