use super::*;

#[test]
fn proxy_errors_map_to_gateway_statuses() {
    assert_eq!(ProxyError::Unreachable("refused".into()).status(), StatusCode::BAD_GATEWAY);
    assert_eq!(ProxyError::BadResponse("truncated".into()).status(), StatusCode::BAD_GATEWAY);
    assert_eq!(ProxyError::Timeout.status(), StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(ProxyError::BodyTooLarge { limit: 10 }.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(ProxyError::BadRequestBody("aborted".into()).status(), StatusCode::BAD_REQUEST);
}

#[test]
fn into_response_uses_mapped_status() {
    let response = ProxyError::Timeout.into_response();
    assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
}

#[test]
fn body_limit_message_names_limit() {
    assert_eq!(ProxyError::BodyTooLarge { limit: 1024 }.to_string(), "request body exceeds 1024 bytes");
}

#[test]
fn config_errors_pass_through_startup_error() {
    let err = StartupError::from(ConfigError::InvalidNumber { var: "PORT", value: "x".to_owned() });
    assert_eq!(err.to_string(), "invalid value for PORT: \"x\"");
}
