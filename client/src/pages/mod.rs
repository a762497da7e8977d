//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates rendering details
//! to `components`. Failure handling and form validation live in pure
//! functions next to each page so they can be tested without a browser.

pub mod anonymous_chat;
pub mod chat;
pub mod create_chat;
pub mod group_chats;
pub mod login;
pub mod profile;
pub mod register;
