use axum::Router;
use axum::http::header::HOST;
use axum::http::{HeaderValue, StatusCode};
use axum::response::AppendHeaders;
use axum::routing::{any, get};

use super::*;
use crate::config::ServerConfig;

#[test]
fn upstream_url_keeps_path_and_query() {
    let uri: Uri = "/api/chats/group_chats/?name=rust&interests=a&interests=b".parse().unwrap();
    assert_eq!(
        upstream_url("http://backend:8000", &uri),
        "http://backend:8000/api/chats/group_chats/?name=rust&interests=a&interests=b"
    );
}

#[test]
fn upstream_url_tolerates_trailing_slash_on_base() {
    let uri: Uri = "/api/users/me/".parse().unwrap();
    assert_eq!(upstream_url("http://backend:8000/", &uri), "http://backend:8000/api/users/me/");
}

#[test]
fn request_filter_drops_unlisted_headers() {
    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
    headers.insert(HOST, HeaderValue::from_static("localhost:3000"));
    headers.insert("x-csrftoken", HeaderValue::from_static("tok"));
    headers.insert("connection", HeaderValue::from_static("keep-alive"));

    let filtered = filter_headers(&headers, &forwarded_request_headers());
    assert_eq!(filtered.len(), 2);
    assert_eq!(filtered.get(AUTHORIZATION).unwrap(), "Bearer abc");
    assert_eq!(filtered.get("x-csrftoken").unwrap(), "tok");
    assert!(filtered.get(HOST).is_none());
}

#[test]
fn response_filter_keeps_every_set_cookie() {
    let mut headers = HeaderMap::new();
    headers.append(SET_COOKIE, HeaderValue::from_static("csrftoken=a; Path=/"));
    headers.append(SET_COOKIE, HeaderValue::from_static("sessionid=b; Path=/"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert("server", HeaderValue::from_static("uvicorn"));

    let filtered = filter_headers(&headers, &returned_response_headers());
    assert_eq!(filtered.get_all(SET_COOKIE).iter().count(), 2);
    assert_eq!(filtered.get(CONTENT_TYPE).unwrap(), "application/json");
    assert!(filtered.get("server").is_none());
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let err = read_body(Body::from(vec![0_u8; 32]), 16).await.unwrap_err();
    assert!(matches!(err, ProxyError::BodyTooLarge { limit: 16 }));
}

#[tokio::test]
async fn body_within_limit_is_read() {
    let bytes = read_body(Body::from("{\"a\":1}"), 16).await.unwrap();
    assert_eq!(&bytes[..], b"{\"a\":1}");
}

#[tokio::test]
async fn aborted_body_is_a_bad_request() {
    let chunks: Vec<Result<Bytes, std::io::Error>> =
        vec![Ok(Bytes::from_static(b"ab")), Err(std::io::Error::other("client aborted"))];
    let err = read_body(Body::from_stream(futures::stream::iter(chunks)), 16).await.unwrap_err();
    assert!(matches!(err, ProxyError::BadRequestBody(_)));
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
}

// =============================================================
// forward
// =============================================================

async fn missing_chat() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        AppendHeaders([(SET_COOKIE, "csrftoken=a; Path=/"), (SET_COOKIE, "sessionid=b; Path=/")]),
        r#"{"detail":"Not found."}"#,
    )
}

async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: String) -> String {
    let auth = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()).unwrap_or("-");
    let leaked = headers.contains_key("x-internal");
    format!("{method} {uri} auth={auth} leaked={leaked} body={body}")
}

async fn spawn_upstream() -> String {
    let app = Router::new()
        .route("/api/chats/99/", get(missing_chat))
        .route("/api/messages/", any(echo));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn state_for(base: &str) -> AppState {
    let config = ServerConfig::from_lookup(|key| (key == "CHAT_API_URL").then(|| base.to_owned())).unwrap();
    AppState::new(config).unwrap()
}

#[tokio::test]
async fn forward_passes_upstream_status_body_and_cookies_through() {
    let base = spawn_upstream().await;
    let uri: Uri = "/api/chats/99/".parse().unwrap();

    let response = forward(State(state_for(&base)), Method::GET, uri, HeaderMap::new(), Body::empty())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.headers().get_all(SET_COOKIE).iter().count(), 2);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], br#"{"detail":"Not found."}"#);
}

#[tokio::test]
async fn forward_replays_method_query_body_and_allowed_headers() {
    let base = spawn_upstream().await;
    let uri: Uri = "/api/messages/?chat=3".parse().unwrap();
    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
    headers.insert("x-internal", HeaderValue::from_static("1"));

    let response = forward(State(state_for(&base)), Method::POST, uri, headers, Body::from("hello"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(
        std::str::from_utf8(&body).unwrap(),
        "POST /api/messages/?chat=3 auth=Bearer abc leaked=false body=hello"
    );
}

#[tokio::test]
async fn forward_to_unreachable_upstream_is_bad_gateway() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let uri: Uri = "/api/users/me/".parse().unwrap();
    let result =
        forward(State(state_for(&format!("http://{addr}"))), Method::GET, uri, HeaderMap::new(), Body::empty())
            .await;

    let Err(err) = result else {
        panic!("expected an unreachable upstream to fail");
    };
    assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
}
