use super::*;

#[test]
fn register_dialog_opens_only_for_flag_one() {
    assert!(wants_register_dialog(Some("1")));
    assert!(!wants_register_dialog(Some("0")));
    assert!(!wants_register_dialog(None));
}

#[test]
fn filters_leave_out_blank_fields() {
    let filters = build_anonymous_filters(Vec::new(), "", " ", "").unwrap();
    assert_eq!(filters, AnonymousChatFilters::default());
}

#[test]
fn filters_keep_gender_and_age_bounds() {
    let filters = build_anonymous_filters(vec!["music".to_owned()], "female", "20", "35").unwrap();
    assert_eq!(filters.gender.as_deref(), Some("female"));
    assert_eq!(filters.min_age, Some(20));
    assert_eq!(filters.max_age, Some(35));
    assert_eq!(filters.interests, vec!["music".to_owned()]);
}

#[test]
fn filters_reject_ages_outside_range() {
    assert_eq!(build_anonymous_filters(Vec::new(), "", "17", ""), Err(AGE_OUT_OF_RANGE));
    assert_eq!(build_anonymous_filters(Vec::new(), "", "", "101"), Err(AGE_OUT_OF_RANGE));
    assert_eq!(build_anonymous_filters(Vec::new(), "", "abc", ""), Err(AGE_OUT_OF_RANGE));
}

#[test]
fn filters_reject_inverted_range() {
    assert_eq!(build_anonymous_filters(Vec::new(), "", "40", "30"), Err(AGE_RANGE_INVERTED));
}

#[test]
fn anonymous_user_requires_nickname_gender_and_age() {
    assert_eq!(validate_anonymous_user(" ", "male", "20"), Err(NICKNAME_REQUIRED));
    assert_eq!(validate_anonymous_user("fox", "", "20"), Err(GENDER_REQUIRED));
    assert_eq!(validate_anonymous_user("fox", "male", ""), Err(AGE_OUT_OF_RANGE));

    let data = validate_anonymous_user(" fox ", "other", "44").unwrap();
    assert_eq!(data, AnonymousUserData { username: "fox".to_owned(), gender: "other".to_owned(), age: 44 });
}
