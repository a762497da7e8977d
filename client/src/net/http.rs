//! Low-level request plumbing shared by the endpoint helpers in `api`.
//!
//! DESIGN
//! ======
//! Every request carries the stored bearer token. Mutating requests first
//! fetch a CSRF token from `/api/csrf/` and attach it as `X-CSRFToken`; a
//! failed CSRF fetch is logged and the request goes out without it.
//! Responses are reduced to `RawResponse` so status handling and decoding
//! stay pure and testable outside the browser.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use serde::de::DeserializeOwned;

use super::error::ApiError;

pub(crate) const CSRF_ENDPOINT: &str = "/api/csrf/";
pub(crate) const CSRF_HEADER: &str = "X-CSRFToken";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Method {
    Get,
    Post,
    Patch,
}

impl Method {
    /// Whether the backend requires a CSRF token for this method.
    pub(crate) fn is_mutating(self) -> bool {
        !matches!(self, Self::Get)
    }
}

/// Status and body text of a completed request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub(crate) fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub(crate) fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Pull `csrfToken` out of the `/api/csrf/` body. Empty tokens count as none.
pub(crate) fn parse_csrf_token(body: &str) -> Option<String> {
    #[derive(serde::Deserialize)]
    struct CsrfResponse {
        #[serde(rename = "csrfToken")]
        csrf_token: Option<String>,
    }
    let parsed: CsrfResponse = serde_json::from_str(body).ok()?;
    parsed.csrf_token.filter(|token| !token.is_empty())
}

/// Turn non-2xx responses into `ApiError::Status`.
pub(crate) fn ensure_success(raw: RawResponse) -> Result<RawResponse, ApiError> {
    if raw.is_success() {
        Ok(raw)
    } else {
        Err(ApiError::from_status(raw.status, &raw.body))
    }
}

/// Decode a successful response body as `T`.
pub(crate) fn decode_json<T: DeserializeOwned>(raw: RawResponse) -> Result<T, ApiError> {
    let raw = ensure_success(raw)?;
    serde_json::from_str(&raw.body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Fetch a CSRF token. Failures are reported to the caller.
///
/// # Errors
///
/// Returns an error if the request fails or the body carries no token.
pub async fn fetch_csrf_token() -> Result<String, ApiError> {
    let raw = ensure_success(dispatch(Method::Get, CSRF_ENDPOINT, &[], None, None).await?)?;
    parse_csrf_token(&raw.body).ok_or_else(|| ApiError::Decode("missing csrfToken".to_owned()))
}

/// Send a request with the stored bearer token and, for mutating methods,
/// a CSRF header.
pub(crate) async fn send(
    method: Method,
    path: &str,
    query: &[(&str, String)],
    body: Option<String>,
) -> Result<RawResponse, ApiError> {
    let csrf = if method.is_mutating() {
        match fetch_csrf_token().await {
            Ok(token) => Some(token),
            Err(e) => {
                leptos::logging::warn!("csrf token fetch failed: {e}");
                None
            }
        }
    } else {
        None
    };
    dispatch(method, path, query, body, csrf).await
}

/// Send `body` as JSON and decode the JSON reply.
pub(crate) async fn send_json<B, T>(method: Method, path: &str, body: &B) -> Result<T, ApiError>
where
    B: serde::Serialize + ?Sized,
    T: DeserializeOwned,
{
    let payload = serde_json::to_string(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    decode_json(send(method, path, &[], Some(payload)).await?)
}

/// GET `path` with `query` and decode the JSON reply.
pub(crate) async fn get_json<T: DeserializeOwned>(
    path: &str,
    query: &[(&str, String)],
) -> Result<T, ApiError> {
    decode_json(send(Method::Get, path, query, None).await?)
}

async fn dispatch(
    method: Method,
    path: &str,
    query: &[(&str, String)],
    body: Option<String>,
    csrf: Option<String>,
) -> Result<RawResponse, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        use gloo_net::http::Request;

        let mut builder = match method {
            Method::Get => Request::get(path),
            Method::Post => Request::post(path),
            Method::Patch => Request::patch(path),
        };
        if !query.is_empty() {
            builder = builder.query(query.iter().map(|(key, value)| (*key, value.as_str())));
        }
        builder = builder.header("Accept", "application/json");
        if let Some(token) = crate::util::storage::access_token() {
            builder = builder.header("Authorization", &bearer(&token));
        }
        if let Some(csrf) = csrf.as_deref() {
            builder = builder.header(CSRF_HEADER, csrf);
        }
        let request = match body {
            Some(body) => builder
                .header("Content-Type", "application/json")
                .body(body)
                .map_err(|e| ApiError::Network(e.to_string()))?,
            None => builder.build().map_err(|e| ApiError::Network(e.to_string()))?,
        };
        let resp = request.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        Ok(RawResponse { status, body })
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (method, path, query, body, csrf);
        Err(ApiError::Unavailable)
    }
}
