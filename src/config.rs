//! Server configuration parsed from environment variables.
//!
//! SYSTEM CONTEXT
//! ==============
//! `main` loads `.env` through `dotenvy` and then calls
//! `ServerConfig::from_env`. Unset variables take defaults; set but invalid
//! values are errors so a typo never silently falls back.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_CHAT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_PROXY_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_PROXY_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_PROXY_MAX_BODY_BYTES: usize = 1024 * 1024;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    InvalidNumber { var: &'static str, value: String },
    #[error("{var} must be an http(s) URL, got {value:?}")]
    InvalidUrl { var: &'static str, value: String },
    #[error("{var} must be a ws(s) URL, got {value:?}")]
    InvalidWsUrl { var: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProxyTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl ProxyTimeouts {
    pub fn request(self) -> Duration {
        Duration::from_secs(self.request_secs)
    }

    pub fn connect(self) -> Duration {
        Duration::from_secs(self.connect_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Upstream REST base URL without trailing slash.
    pub chat_api_url: String,
    /// Upstream websocket base URL without trailing slash.
    pub chat_ws_url: String,
    pub timeouts: ProxyTimeouts,
    pub max_body_bytes: usize,
}

impl ServerConfig {
    /// Build typed server config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `CHAT_API_URL`: default `http://localhost:8000`
    /// - `CHAT_WS_URL`: derived from `CHAT_API_URL` when absent
    /// - `CHAT_PROXY_TIMEOUT_SECS`: default 30
    /// - `CHAT_PROXY_CONNECT_TIMEOUT_SECS`: default 10
    /// - `CHAT_PROXY_MAX_BODY_BYTES`: default 1 MiB
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a variable is set to an unusable value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = env_parse(&lookup, "PORT", DEFAULT_PORT)?;

        let chat_api_url = normalize_base_url(
            &lookup("CHAT_API_URL").unwrap_or_else(|| DEFAULT_CHAT_API_URL.to_owned()),
        );
        if !(chat_api_url.starts_with("http://") || chat_api_url.starts_with("https://")) {
            return Err(ConfigError::InvalidUrl { var: "CHAT_API_URL", value: chat_api_url });
        }

        let chat_ws_url = match lookup("CHAT_WS_URL") {
            Some(raw) => {
                let url = normalize_base_url(&raw);
                if !(url.starts_with("ws://") || url.starts_with("wss://")) {
                    return Err(ConfigError::InvalidWsUrl { var: "CHAT_WS_URL", value: url });
                }
                url
            }
            None => derive_ws_url(&chat_api_url),
        };

        let timeouts = ProxyTimeouts {
            request_secs: env_parse(&lookup, "CHAT_PROXY_TIMEOUT_SECS", DEFAULT_PROXY_TIMEOUT_SECS)?,
            connect_secs: env_parse(
                &lookup,
                "CHAT_PROXY_CONNECT_TIMEOUT_SECS",
                DEFAULT_PROXY_CONNECT_TIMEOUT_SECS,
            )?,
        };
        let max_body_bytes = env_parse(&lookup, "CHAT_PROXY_MAX_BODY_BYTES", DEFAULT_PROXY_MAX_BODY_BYTES)?;

        Ok(Self { port, chat_api_url, chat_ws_url, timeouts, max_body_bytes })
    }
}

/// Trim whitespace and trailing slashes.
fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_owned()
}

/// `http` becomes `ws`, `https` becomes `wss`.
pub fn derive_ws_url(api_url: &str) -> String {
    if let Some(rest) = api_url.strip_prefix("https://") {
        format!("wss://{rest}")
    } else if let Some(rest) = api_url.strip_prefix("http://") {
        format!("ws://{rest}")
    } else {
        api_url.to_owned()
    }
}

fn env_parse<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(var) {
        None => Ok(default),
        Some(raw) if raw.trim().is_empty() => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { var, value: raw }),
    }
}
