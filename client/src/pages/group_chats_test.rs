use super::*;

#[test]
fn unauthorized_redirects_to_login() {
    let err = ApiError::Status { status: 401, message: String::new() };
    assert_eq!(list_failure(&err, CHATS_FAILED), ListFailure::RedirectLogin);
}

#[test]
fn other_failures_show_given_message() {
    let err = ApiError::Status { status: 500, message: String::new() };
    assert_eq!(list_failure(&err, JOIN_FAILED), ListFailure::Show(JOIN_FAILED));
    let err = ApiError::Network("offline".to_owned());
    assert_eq!(list_failure(&err, INTERESTS_FAILED), ListFailure::Show(INTERESTS_FAILED));
}

#[test]
fn min_participants_defaults_to_zero() {
    assert_eq!(parse_min_participants(""), 0);
    assert_eq!(parse_min_participants("abc"), 0);
    assert_eq!(parse_min_participants(" 4 "), 4);
}
