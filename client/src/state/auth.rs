//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Provided once by `App` as `RwSignal<AuthState>` and read by route guards,
//! the navbar, and pages that compare the current user with chat members.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::User;

/// Authentication state tracking the current user and loading status.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    /// True until the startup session restore has finished.
    pub loading: bool,
}

impl AuthState {
    /// Initial state before the stored session has been checked.
    pub fn restoring() -> Self {
        Self { user: None, loading: true }
    }

    pub fn user_id(&self) -> Option<i64> {
        self.user.as_ref().map(|u| u.id)
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}
