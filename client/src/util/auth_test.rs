use super::*;

fn user() -> User {
    User {
        id: 1,
        username: "alice".to_owned(),
        email: None,
        age: Some(22),
        gender: Some("female".to_owned()),
        role: Some("USER".to_owned()),
        interests: Vec::new(),
        created_at: None,
        updated_at: None,
    }
}

#[test]
fn should_redirect_unauth_when_not_loading_and_user_missing() {
    let state = AuthState { user: None, loading: false };
    assert!(should_redirect_unauth(&state));
}

#[test]
fn should_not_redirect_while_loading() {
    assert!(!should_redirect_unauth(&AuthState::restoring()));
}

#[test]
fn should_not_redirect_when_user_exists() {
    let state = AuthState { user: Some(user()), loading: false };
    assert!(!should_redirect_unauth(&state));
}

#[test]
fn home_target_depends_on_stored_token() {
    assert_eq!(home_target(true), "/profile");
    assert_eq!(home_target(false), "/anonymous-chat");
}

#[test]
fn refresh_only_on_unauthorized_with_refresh_token() {
    let unauthorized = ApiError::Status { status: 401, message: String::new() };
    let forbidden = ApiError::Status { status: 403, message: String::new() };
    assert!(should_refresh(&unauthorized, true));
    assert!(!should_refresh(&unauthorized, false));
    assert!(!should_refresh(&forbidden, true));
    assert!(!should_refresh(&ApiError::Network("down".to_owned()), true));
}

#[test]
fn auth_gate_waits_for_restore() {
    assert_eq!(auth_gate(&AuthState::restoring()), AuthGate::Pending);
    let restoring_with_user = AuthState { user: Some(user()), loading: true };
    assert_eq!(auth_gate(&restoring_with_user), AuthGate::Pending);
}

#[test]
fn auth_gate_reports_signed_in_user_id() {
    let state = AuthState { user: Some(user()), loading: false };
    assert_eq!(auth_gate(&state), AuthGate::SignedIn(1));
    assert_eq!(auth_gate(&AuthState { user: None, loading: false }), AuthGate::SignedOut);
}
