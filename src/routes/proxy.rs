//! `/api/*` forwarder to the upstream chat service.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser only talks to this server. Every `/api/...` request is
//! replayed against `CHAT_API_URL` with the same method, path, query and
//! body. Only allow-listed headers cross in either direction so hop-by-hop
//! and host headers never leak.
//!
//! ERROR HANDLING
//! ==============
//! Transport and body failures become `ProxyError` (502/504/413/400).
//! Upstream 4xx/5xx responses are passed through untouched; the client
//! interprets them.

#[cfg(test)]
#[path = "proxy_test.rs"]
mod proxy_test;

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, COOKIE, HeaderName, SET_COOKIE};
use axum::http::{HeaderMap, Method, Uri};
use axum::response::{IntoResponse, Response};
use futures::StreamExt;

use crate::error::ProxyError;
use crate::state::AppState;

/// Request headers copied to the upstream request.
pub fn forwarded_request_headers() -> [HeaderName; 5] {
    [AUTHORIZATION, CONTENT_TYPE, ACCEPT, COOKIE, HeaderName::from_static("x-csrftoken")]
}

/// Response headers copied back to the browser.
pub fn returned_response_headers() -> [HeaderName; 2] {
    [CONTENT_TYPE, SET_COOKIE]
}

/// Keep only `allowed` headers, preserving repeated values.
pub fn filter_headers(headers: &HeaderMap, allowed: &[HeaderName]) -> HeaderMap {
    let mut out = HeaderMap::new();
    for name in allowed {
        for value in headers.get_all(name) {
            out.append(name.clone(), value.clone());
        }
    }
    out
}

/// Join the upstream base with the incoming path and query.
pub fn upstream_url(base: &str, uri: &Uri) -> String {
    let path_and_query = uri.path_and_query().map_or_else(|| uri.path(), |pq| pq.as_str());
    format!("{}{path_and_query}", base.trim_end_matches('/'))
}

/// Collect the request body. Only exceeding `limit` is a 413; a stream that
/// fails midway (client abort) is a 400.
async fn read_body(body: Body, limit: usize) -> Result<Bytes, ProxyError> {
    let mut stream = body.into_data_stream();
    let mut buf = Vec::new();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| ProxyError::BadRequestBody(e.to_string()))?;
        if buf.len() + chunk.len() > limit {
            return Err(ProxyError::BodyTooLarge { limit });
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(Bytes::from(buf))
}

/// Forward one request and relay the upstream response.
pub async fn forward(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Body,
) -> Result<Response, ProxyError> {
    let body = read_body(body, state.config.max_body_bytes).await?;
    let url = upstream_url(&state.config.chat_api_url, &uri);

    let upstream = state
        .http
        .request(method.clone(), &url)
        .headers(filter_headers(&headers, &forwarded_request_headers()))
        .body(body)
        .send()
        .await?;

    let status = upstream.status();
    let response_headers = filter_headers(upstream.headers(), &returned_response_headers());
    let bytes = upstream.bytes().await?;

    tracing::debug!(%method, path = uri.path(), status = status.as_u16(), "proxied request");
    Ok((status, response_headers, bytes).into_response())
}
