//! Reactive application state.
//!
//! `auth` is provided app-wide through context; `chat` is owned by the chat
//! room page.

pub mod auth;
pub mod chat;
