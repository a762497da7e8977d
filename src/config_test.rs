use std::collections::HashMap;

use super::*;

fn config_from(pairs: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    ServerConfig::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn defaults_apply_when_unset() {
    let cfg = config_from(&[]).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.chat_api_url, DEFAULT_CHAT_API_URL);
    assert_eq!(cfg.chat_ws_url, "ws://localhost:8000");
    assert_eq!(
        cfg.timeouts,
        ProxyTimeouts {
            request_secs: DEFAULT_PROXY_TIMEOUT_SECS,
            connect_secs: DEFAULT_PROXY_CONNECT_TIMEOUT_SECS
        }
    );
    assert_eq!(cfg.max_body_bytes, DEFAULT_PROXY_MAX_BODY_BYTES);
}

#[test]
fn overrides_are_parsed() {
    let cfg = config_from(&[
        ("PORT", "8080"),
        ("CHAT_API_URL", "https://chat.example.com/"),
        ("CHAT_PROXY_TIMEOUT_SECS", "5"),
        ("CHAT_PROXY_CONNECT_TIMEOUT_SECS", "2"),
        ("CHAT_PROXY_MAX_BODY_BYTES", "2048"),
    ])
    .unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.chat_api_url, "https://chat.example.com");
    assert_eq!(cfg.chat_ws_url, "wss://chat.example.com");
    assert_eq!(cfg.timeouts.request(), Duration::from_secs(5));
    assert_eq!(cfg.timeouts.connect(), Duration::from_secs(2));
    assert_eq!(cfg.max_body_bytes, 2048);
}

#[test]
fn explicit_ws_url_wins_over_derived() {
    let cfg = config_from(&[("CHAT_API_URL", "http://api:8000"), ("CHAT_WS_URL", "ws://realtime:8001//")]).unwrap();
    assert_eq!(cfg.chat_ws_url, "ws://realtime:8001");
}

#[test]
fn blank_values_fall_back_to_defaults() {
    let cfg = config_from(&[("PORT", "  ")]).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
}

#[test]
fn invalid_numbers_are_errors() {
    assert_eq!(
        config_from(&[("PORT", "eighty")]),
        Err(ConfigError::InvalidNumber { var: "PORT", value: "eighty".to_owned() })
    );
    assert!(matches!(
        config_from(&[("CHAT_PROXY_TIMEOUT_SECS", "-1")]),
        Err(ConfigError::InvalidNumber { var: "CHAT_PROXY_TIMEOUT_SECS", .. })
    ));
}

#[test]
fn non_http_api_url_is_rejected() {
    assert!(matches!(
        config_from(&[("CHAT_API_URL", "ftp://files")]),
        Err(ConfigError::InvalidUrl { var: "CHAT_API_URL", .. })
    ));
}

#[test]
fn non_ws_socket_url_is_rejected() {
    assert!(matches!(
        config_from(&[("CHAT_WS_URL", "http://realtime")]),
        Err(ConfigError::InvalidWsUrl { var: "CHAT_WS_URL", .. })
    ));
}

#[test]
fn derive_ws_url_maps_schemes() {
    assert_eq!(derive_ws_url("http://a:1"), "ws://a:1");
    assert_eq!(derive_ws_url("https://a"), "wss://a");
}
