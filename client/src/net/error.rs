//! Error type shared by every REST call.
//!
//! ERROR HANDLING
//! ==============
//! Pages match on `ApiError::status()` to decide between redirecting,
//! clearing the session, or showing an inline message. The upstream
//! `error`/`detail` field is kept so pages can surface it verbatim.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request failed ({status}): {message}")]
    Status { status: u16, message: String },
    #[error("invalid response: {0}")]
    Decode(String),
    #[error("no refresh token stored")]
    MissingRefreshToken,
    #[error("not available on server")]
    Unavailable,
}

impl ApiError {
    /// Build a status error from a non-2xx response body.
    pub fn from_status(status: u16, body: &str) -> Self {
        Self::Status { status, message: extract_message(body).unwrap_or_default() }
    }

    /// HTTP status for `Status` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Upstream `error`/`detail` text, if the service sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }
}

fn extract_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["error", "detail", "message"]
        .iter()
        .find_map(|key| value.get(*key).and_then(serde_json::Value::as_str))
        .map(str::to_owned)
}
