use super::*;

#[test]
fn blank_name_blocks_creation() {
    let interests = vec!["music".to_owned()];
    assert_eq!(validate_create_chat("", &interests), Err(NAME_REQUIRED));
    assert_eq!(validate_create_chat("   \t", &interests), Err(NAME_REQUIRED));
}

#[test]
fn missing_interests_block_creation() {
    assert_eq!(validate_create_chat("Hikers", &[]), Err(INTERESTS_REQUIRED));
}

#[test]
fn name_is_checked_before_interests() {
    assert_eq!(validate_create_chat(" ", &[]), Err(NAME_REQUIRED));
}

#[test]
fn valid_form_builds_payload() {
    let data = validate_create_chat(" Hikers ", &["outdoors".to_owned()]).unwrap();
    assert_eq!(data, CreateGroupChat { name: "Hikers".to_owned(), interest_names: vec!["outdoors".to_owned()] });
}
