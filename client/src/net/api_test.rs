use super::*;

fn raw(status: u16, body: &str) -> RawResponse {
    RawResponse { status, body: body.to_owned() }
}

#[test]
fn chat_endpoints_format_expected_paths() {
    assert_eq!(chat_endpoint(9), "/api/chats/9/");
    assert_eq!(join_chat_endpoint(9), "/api/chats/9/join_chat/");
    assert_eq!(leave_chat_endpoint(9), "/api/chats/9/leave_chat/");
}

#[test]
fn user_endpoint_formats_expected_path() {
    assert_eq!(user_endpoint(3), "/api/users/3/");
}

#[test]
fn messages_query_filters_by_chat() {
    assert_eq!(messages_query(15), [("chat", "15".to_owned())]);
}

#[test]
fn leave_no_content_is_ordinary_leave() {
    let outcome = parse_leave_outcome(raw(204, "")).unwrap();
    assert!(!outcome.user_deleted);
}

#[test]
fn leave_reports_deleted_anonymous_user() {
    let outcome = parse_leave_outcome(raw(
        200,
        r#"{"message":"User deleted successfully","user_deleted":true}"#,
    ))
    .unwrap();
    assert!(outcome.user_deleted);
    assert_eq!(outcome.message.as_deref(), Some("User deleted successfully"));
}

#[test]
fn leave_with_unrelated_body_is_ordinary_leave() {
    let outcome = parse_leave_outcome(raw(200, r#"{"status":"left"}"#)).unwrap();
    assert!(!outcome.user_deleted);
}

#[test]
fn leave_failure_keeps_status() {
    let err = parse_leave_outcome(raw(400, r#"{"error":"You are not a member of this chat"}"#))
        .unwrap_err();
    assert_eq!(err.status(), Some(400));
}
