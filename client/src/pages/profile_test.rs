use super::*;

#[test]
fn validate_profile_requires_username() {
    assert_eq!(validate_profile("  ", "20", "male"), Err(PROFILE_MISSING_USERNAME));
}

#[test]
fn validate_profile_leaves_blank_optionals_unset() {
    let update = validate_profile(" neo ", "", " ").unwrap();
    assert_eq!(update, ProfileUpdate { username: "neo".to_owned(), age: None, gender: None });
}

#[test]
fn validate_profile_parses_age_and_gender() {
    let update = validate_profile("neo", "33", "other").unwrap();
    assert_eq!(update.age, Some(33));
    assert_eq!(update.gender.as_deref(), Some("other"));
}

#[test]
fn validate_profile_rejects_bad_age() {
    assert_eq!(validate_profile("neo", "zero", ""), Err(PROFILE_INVALID_AGE));
    assert_eq!(validate_profile("neo", "0", ""), Err(PROFILE_INVALID_AGE));
}
