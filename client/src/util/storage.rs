//! Browser localStorage helpers for the persisted session.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session lives under three keys: `token` (access JWT),
//! `refreshToken`, and `user` (JSON). These helpers centralize hydrate-only
//! web-sys glue so the REST layer and auth flows never touch storage APIs
//! directly. Outside the browser every read is `None` and writes are no-ops.

use serde::Serialize;

use crate::net::types::User;

pub const TOKEN_KEY: &str = "token";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
pub const USER_KEY: &str = "user";

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

/// Load a raw string for `key`.
pub fn load_string(key: &str) -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        local_storage()?.get_item(key).ok().flatten()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = key;
        None
    }
}

pub fn save_string(key: &str, value: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(storage) = local_storage() {
            let _ = storage.set_item(key, value);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (key, value);
    }
}

pub fn remove(key: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(key);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = key;
    }
}

/// Save a JSON value to `localStorage` for `key`.
pub fn save_json<T: Serialize>(key: &str, value: &T) {
    let Ok(raw) = serde_json::to_string(value) else {
        return;
    };
    save_string(key, &raw);
}

pub fn access_token() -> Option<String> {
    load_string(TOKEN_KEY).filter(|t| !t.is_empty())
}

pub fn refresh_token() -> Option<String> {
    load_string(REFRESH_TOKEN_KEY).filter(|t| !t.is_empty())
}

/// Store a token pair. A missing refresh token leaves the stored one alone.
pub fn store_tokens(access: &str, refresh: Option<&str>) {
    save_string(TOKEN_KEY, access);
    if let Some(refresh) = refresh {
        save_string(REFRESH_TOKEN_KEY, refresh);
    }
}

pub fn store_user(user: &User) {
    save_json(USER_KEY, user);
}

/// Forget every persisted credential.
pub fn clear_session() {
    remove(TOKEN_KEY);
    remove(REFRESH_TOKEN_KEY);
    remove(USER_KEY);
}
