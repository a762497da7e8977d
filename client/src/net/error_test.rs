use super::*;

#[test]
fn from_status_extracts_error_field() {
    let err = ApiError::from_status(400, r#"{"error":"Already joined this chat"}"#);
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.server_message(), Some("Already joined this chat"));
}

#[test]
fn from_status_falls_back_to_detail() {
    let err = ApiError::from_status(401, r#"{"detail":"Given token not valid for any token type"}"#);
    assert!(err.is_unauthorized());
    assert_eq!(err.server_message(), Some("Given token not valid for any token type"));
}

#[test]
fn from_status_tolerates_non_json_body() {
    let err = ApiError::from_status(502, "<html>bad gateway</html>");
    assert_eq!(err.status(), Some(502));
    assert_eq!(err.server_message(), None);
}

#[test]
fn non_status_errors_have_no_status() {
    assert_eq!(ApiError::Network("offline".to_owned()).status(), None);
    assert_eq!(ApiError::Unavailable.status(), None);
    assert!(!ApiError::MissingRefreshToken.is_unauthorized());
}

#[test]
fn display_includes_status_and_message() {
    let err = ApiError::from_status(404, r#"{"error":"Chat not found"}"#);
    assert_eq!(err.to_string(), "request failed (404): Chat not found");
}
