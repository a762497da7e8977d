use super::*;

fn form() -> RegisterForm {
    RegisterForm {
        username: "alice".to_owned(),
        password: "secret".to_owned(),
        email: "alice@example.com".to_owned(),
        age: "27".to_owned(),
        gender: "female".to_owned(),
        interests: vec!["music".to_owned()],
    }
}

#[test]
fn validate_register_builds_payload() {
    let data = validate_register(&form()).unwrap();
    assert_eq!(data.age, 27);
    assert_eq!(data.gender, "female");
    assert_eq!(data.interests, vec!["music".to_owned()]);
}

#[test]
fn validate_register_requires_every_field() {
    let mut missing_email = form();
    missing_email.email = "  ".to_owned();
    assert_eq!(validate_register(&missing_email), Err(REGISTER_MISSING_FIELDS));

    let mut missing_password = form();
    missing_password.password.clear();
    assert_eq!(validate_register(&missing_password), Err(REGISTER_MISSING_FIELDS));
}

#[test]
fn validate_register_rejects_non_positive_age() {
    for bad in ["0", "-3", "abc", "4.5"] {
        let mut f = form();
        f.age = bad.to_owned();
        assert_eq!(validate_register(&f), Err(REGISTER_INVALID_AGE), "age {bad}");
    }
}

#[test]
fn validate_register_rejects_unknown_gender() {
    let mut f = form();
    f.gender = "robot".to_owned();
    assert_eq!(validate_register(&f), Err(REGISTER_INVALID_GENDER));
}

#[test]
fn parse_age_trims_whitespace() {
    assert_eq!(parse_age(" 30 "), Some(30));
}
