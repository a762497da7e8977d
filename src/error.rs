//! Server error types.
//!
//! ERROR HANDLING
//! ==============
//! `ProxyError` covers failures while forwarding `/api/*` and maps onto the
//! gateway statuses the browser client understands, or 400/413 when the
//! incoming body cannot be read. `StartupError` collects everything that
//! can stop the process before it serves traffic.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("upstream unreachable: {0}")]
    Unreachable(String),
    #[error("upstream timed out")]
    Timeout,
    #[error("request body exceeds {limit} bytes")]
    BodyTooLarge { limit: usize },
    #[error("failed to read request body: {0}")]
    BadRequestBody(String),
    #[error("invalid upstream response: {0}")]
    BadResponse(String),
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unreachable(_) | Self::BadResponse(_) => StatusCode::BAD_GATEWAY,
            Self::Timeout => StatusCode::GATEWAY_TIMEOUT,
            Self::BodyTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::BadRequestBody(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<reqwest::Error> for ProxyError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_decode() || e.is_body() {
            Self::BadResponse(e.to_string())
        } else {
            Self::Unreachable(e.to_string())
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::warn!(error = %self, status = status.as_u16(), "proxy request failed");
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("http client: {0}")]
    HttpClient(#[from] reqwest::Error),
    #[error("leptos configuration: {0}")]
    Leptos(String),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
