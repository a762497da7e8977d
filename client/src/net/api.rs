//! REST API helpers for communicating with the chat service.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net` through `http`.
//! Server-side (SSR): every call returns `ApiError::Unavailable` since these
//! endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Result<_, ApiError>` instead of panics so pages can match on
//! the HTTP status and degrade UI behavior without crashing hydration.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::error::ApiError;
use super::http::{self, Method, RawResponse};
use super::types::{
    AnonymousChatFilters, AnonymousUserData, Chat, CreateGroupChat, GroupChatFilters, Interest,
    LeaveOutcome, LoginData, Message, ProfileUpdate, RefreshRequest, RegisterData, SendMessage,
    TokenPair, User,
};
use crate::util::storage;

const TOKEN_ENDPOINT: &str = "/api/token/";
const TOKEN_REFRESH_ENDPOINT: &str = "/api/token/refresh/";
const REGISTER_ENDPOINT: &str = "/api/users/register/";
const ANONYMOUS_ENDPOINT: &str = "/api/users/anonymous/";
const ME_ENDPOINT: &str = "/api/users/me/";
const CHATS_ENDPOINT: &str = "/api/chats/";
const GROUP_CHATS_ENDPOINT: &str = "/api/chats/group_chats/";
const FIND_ANONYMOUS_ENDPOINT: &str = "/api/chats/find_anonymous_chat/";
const MESSAGES_ENDPOINT: &str = "/api/messages/";
const INTERESTS_ENDPOINT: &str = "/api/interests/";

fn user_endpoint(user_id: i64) -> String {
    format!("/api/users/{user_id}/")
}

fn chat_endpoint(chat_id: i64) -> String {
    format!("/api/chats/{chat_id}/")
}

fn join_chat_endpoint(chat_id: i64) -> String {
    format!("/api/chats/{chat_id}/join_chat/")
}

fn leave_chat_endpoint(chat_id: i64) -> String {
    format!("/api/chats/{chat_id}/leave_chat/")
}

fn messages_query(chat_id: i64) -> [(&'static str, String); 1] {
    [("chat", chat_id.to_string())]
}

/// Interpret a leave response. `204` and bodies without `user_deleted: true`
/// are ordinary leaves.
fn parse_leave_outcome(raw: RawResponse) -> Result<LeaveOutcome, ApiError> {
    let raw = http::ensure_success(raw)?;
    if raw.status == 204 || raw.body.trim().is_empty() {
        return Ok(LeaveOutcome::default());
    }
    Ok(serde_json::from_str(&raw.body).unwrap_or_default())
}

// =============================================================================
// AUTH
// =============================================================================

/// Exchange credentials for a token pair via `POST /api/token/`.
///
/// # Errors
///
/// Returns `ApiError::Status` with 401 for bad credentials.
pub async fn login(data: &LoginData) -> Result<TokenPair, ApiError> {
    http::send_json(Method::Post, TOKEN_ENDPOINT, data).await
}

/// Exchange the stored refresh token for a new access token and store it.
///
/// # Errors
///
/// Returns `ApiError::MissingRefreshToken` when nothing is stored, or the
/// request error otherwise.
pub async fn refresh_access_token() -> Result<String, ApiError> {
    let refresh = storage::refresh_token().ok_or(ApiError::MissingRefreshToken)?;
    let pair: TokenPair =
        http::send_json(Method::Post, TOKEN_REFRESH_ENDPOINT, &RefreshRequest { refresh: &refresh })
            .await?;
    storage::store_tokens(&pair.access, pair.refresh.as_deref());
    Ok(pair.access)
}

/// Create a full account via `POST /api/users/register/`.
///
/// # Errors
///
/// Returns the request error; validation failures come back as 400.
pub async fn register(data: &RegisterData) -> Result<TokenPair, ApiError> {
    http::send_json(Method::Post, REGISTER_ENDPOINT, data).await
}

/// Create an anonymous account via `POST /api/users/anonymous/`.
///
/// # Errors
///
/// Returns the request error.
pub async fn register_anonymous(data: &AnonymousUserData) -> Result<TokenPair, ApiError> {
    http::send_json(Method::Post, ANONYMOUS_ENDPOINT, data).await
}

/// Fetch the authenticated user from `GET /api/users/me/`.
///
/// # Errors
///
/// Returns `ApiError::Status` with 401 when the token is missing or stale.
pub async fn current_user() -> Result<User, ApiError> {
    http::get_json(ME_ENDPOINT, &[]).await
}

/// Partially update a user via `PATCH /api/users/{id}/`.
///
/// # Errors
///
/// Returns the request error.
pub async fn update_profile(user_id: i64, update: &ProfileUpdate) -> Result<User, ApiError> {
    http::send_json(Method::Patch, &user_endpoint(user_id), update).await
}

// =============================================================================
// CHATS
// =============================================================================

/// Search group chats via `GET /api/chats/group_chats/`.
///
/// # Errors
///
/// Returns the request error.
pub async fn group_chats(filters: &GroupChatFilters) -> Result<Vec<Chat>, ApiError> {
    http::get_json(GROUP_CHATS_ENDPOINT, &filters.query_pairs()).await
}

/// Chats the current user participates in, from `GET /api/chats/`.
///
/// # Errors
///
/// Returns the request error.
pub async fn user_chats() -> Result<Vec<Chat>, ApiError> {
    http::get_json(CHATS_ENDPOINT, &[]).await
}

/// Ask the service to match the current user into an anonymous chat.
///
/// # Errors
///
/// Returns the request error.
pub async fn find_anonymous_chat(filters: &AnonymousChatFilters) -> Result<Chat, ApiError> {
    http::send_json(Method::Post, FIND_ANONYMOUS_ENDPOINT, filters).await
}

/// Join a group chat via `POST /api/chats/{id}/join_chat/`.
///
/// # Errors
///
/// Returns `ApiError::Status` with 400 for "Already joined this chat" or
/// non-group chats, 404 for unknown chats.
pub async fn join_chat(chat_id: i64) -> Result<(), ApiError> {
    let raw = http::send(Method::Post, &join_chat_endpoint(chat_id), &[], None).await?;
    http::ensure_success(raw).map(|_| ())
}

/// Leave a chat via `POST /api/chats/{id}/leave_chat/`.
///
/// # Errors
///
/// Returns `ApiError::Status` with 400 when not a member, 404 for unknown
/// chats, 401 when the session is gone.
pub async fn leave_chat(chat_id: i64) -> Result<LeaveOutcome, ApiError> {
    let raw = http::send(Method::Post, &leave_chat_endpoint(chat_id), &[], None).await?;
    parse_leave_outcome(raw)
}

/// Fetch one chat via `GET /api/chats/{id}/`.
///
/// # Errors
///
/// Returns `ApiError::Status` with 404 for unknown chats.
pub async fn get_chat(chat_id: i64) -> Result<Chat, ApiError> {
    http::get_json(&chat_endpoint(chat_id), &[]).await
}

/// Create a group chat via `POST /api/chats/`.
///
/// # Errors
///
/// Returns the request error.
pub async fn create_group_chat(data: &CreateGroupChat) -> Result<Chat, ApiError> {
    http::send_json(Method::Post, CHATS_ENDPOINT, data).await
}

// =============================================================================
// MESSAGES & INTERESTS
// =============================================================================

/// Messages of one chat via `GET /api/messages/?chat={id}`.
///
/// # Errors
///
/// Returns the request error.
pub async fn chat_messages(chat_id: i64) -> Result<Vec<Message>, ApiError> {
    http::get_json(MESSAGES_ENDPOINT, &messages_query(chat_id)).await
}

/// Post a message via `POST /api/messages/`.
///
/// # Errors
///
/// Returns the request error.
pub async fn send_message(chat_id: i64, content: &str) -> Result<Message, ApiError> {
    http::send_json(Method::Post, MESSAGES_ENDPOINT, &SendMessage { chat: chat_id, content }).await
}

/// All interests via `GET /api/interests/`.
///
/// # Errors
///
/// Returns the request error.
pub async fn interests() -> Result<Vec<Interest>, ApiError> {
    http::get_json(INTERESTS_ENDPOINT, &[]).await
}

/// Fetch a CSRF token from `GET /api/csrf/`.
///
/// # Errors
///
/// Returns the request error or a decode error when no token is present.
pub async fn csrf_token() -> Result<String, ApiError> {
    http::fetch_csrf_token().await
}
