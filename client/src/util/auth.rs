//! Shared auth helpers: route guard and session flows.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route components apply identical unauthenticated redirect behavior, and
//! every page that signs a user in goes through the same flows so tokens,
//! the stored `user`, and `AuthState` never drift apart.
//!
//! ERROR HANDLING
//! ==============
//! Flows return the `ApiError` of the failing step; the pages turn it into
//! an inline message. A failed session restore clears the stored session.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::net::api;
use crate::net::error::ApiError;
use crate::net::types::{AnonymousUserData, LoginData, RegisterData, TokenPair, User};
use crate::state::auth::AuthState;
use crate::util::storage;

/// Where unauthenticated visitors of protected pages are sent.
pub const UNAUTH_REDIRECT: &str = "/anonymous-chat";

/// Where the startup session restore currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthGate {
    Pending,
    SignedOut,
    SignedIn(i64),
}

pub fn auth_gate(state: &AuthState) -> AuthGate {
    if state.loading {
        return AuthGate::Pending;
    }
    state.user_id().map_or(AuthGate::SignedOut, AuthGate::SignedIn)
}

/// True once auth finished loading and no user is present.
pub fn should_redirect_unauth(state: &AuthState) -> bool {
    auth_gate(state) == AuthGate::SignedOut
}

/// Run `load` once, the first time auth settles with a signed-in user.
/// Signed-out visitors never reach `load`; they only see the guard redirect.
pub fn when_signed_in<F>(auth: RwSignal<AuthState>, load: F)
where
    F: Fn() + 'static,
{
    let started = RwSignal::new(false);
    Effect::new(move || {
        if started.get_untracked() {
            return;
        }
        if matches!(auth_gate(&auth.get()), AuthGate::SignedIn(_)) {
            started.set(true);
            load();
        }
    });
}

/// Redirect to `/anonymous-chat` whenever auth has loaded and no user is present.
pub fn install_unauth_redirect<F>(auth: RwSignal<AuthState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        let state = auth.get();
        if should_redirect_unauth(&state) {
            navigate(UNAUTH_REDIRECT, NavigateOptions::default());
        }
    });
}

/// Landing route for `/`.
pub fn home_target(has_token: bool) -> &'static str {
    if has_token { "/profile" } else { UNAUTH_REDIRECT }
}

/// A stale access token is worth one refresh attempt when a refresh token exists.
pub fn should_refresh(err: &ApiError, has_refresh_token: bool) -> bool {
    err.is_unauthorized() && has_refresh_token
}

fn finish_sign_in(auth: RwSignal<AuthState>, user: User) -> User {
    storage::store_user(&user);
    auth.set(AuthState { user: Some(user.clone()), loading: false });
    user
}

async fn adopt_tokens(auth: RwSignal<AuthState>, pair: TokenPair) -> Result<User, ApiError> {
    storage::store_tokens(&pair.access, pair.refresh.as_deref());
    let user = api::current_user().await?;
    Ok(finish_sign_in(auth, user))
}

/// Restore the stored session on startup.
///
/// A 401 from `me` with a stored refresh token triggers one token refresh
/// and one retry. Any other failure clears the stored session.
pub async fn restore_session(auth: RwSignal<AuthState>) {
    if storage::access_token().is_none() {
        auth.set(AuthState { user: None, loading: false });
        return;
    }

    let mut result = api::current_user().await;
    if let Err(e) = &result {
        if should_refresh(e, storage::refresh_token().is_some()) {
            result = match api::refresh_access_token().await {
                Ok(_) => api::current_user().await,
                Err(refresh_err) => Err(refresh_err),
            };
        }
    }

    match result {
        Ok(user) => {
            finish_sign_in(auth, user);
        }
        Err(e) => {
            leptos::logging::warn!("session restore failed: {e}");
            storage::clear_session();
            auth.set(AuthState { user: None, loading: false });
        }
    }
}

/// Sign in with username and password.
///
/// # Errors
///
/// Returns the error of the token exchange or the `me` fetch.
pub async fn login(auth: RwSignal<AuthState>, data: LoginData) -> Result<User, ApiError> {
    let pair = api::login(&data).await?;
    adopt_tokens(auth, pair).await
}

/// Register a full account and sign in.
///
/// # Errors
///
/// Returns the error of the registration or the `me` fetch.
pub async fn register(auth: RwSignal<AuthState>, data: RegisterData) -> Result<User, ApiError> {
    let pair = api::register(&data).await?;
    adopt_tokens(auth, pair).await
}

/// Register an anonymous account and sign in.
///
/// # Errors
///
/// Returns the error of the registration or the `me` fetch.
pub async fn register_anonymous(
    auth: RwSignal<AuthState>,
    data: AnonymousUserData,
) -> Result<User, ApiError> {
    let pair = api::register_anonymous(&data).await?;
    adopt_tokens(auth, pair).await
}

/// Forget the stored session and the current user.
pub fn logout(auth: RwSignal<AuthState>) {
    storage::clear_session();
    auth.update(|a| a.user = None);
}

/// Replace the current user after a profile edit.
pub fn replace_user(auth: RwSignal<AuthState>, user: User) {
    finish_sign_in(auth, user);
}
