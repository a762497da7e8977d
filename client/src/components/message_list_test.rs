use super::*;
use crate::net::types::User;

fn message_from(sender_id: i64) -> Message {
    Message {
        id: 1,
        content: "hi".to_owned(),
        sender: User {
            id: sender_id,
            username: "bob".to_owned(),
            email: None,
            age: None,
            gender: None,
            role: None,
            interests: Vec::new(),
            created_at: None,
            updated_at: None,
        },
        chat: Some(1),
        created_at: String::new(),
        updated_at: None,
    }
}

#[test]
fn group_chat_shows_username() {
    assert_eq!(sender_label(&message_from(2), false, Some(2)), "bob");
    assert_eq!(sender_label(&message_from(2), false, None), "bob");
}

#[test]
fn anonymous_chat_hides_username() {
    assert_eq!(sender_label(&message_from(2), true, Some(3)), "Anonymous");
    assert_eq!(sender_label(&message_from(2), true, Some(2)), "Anonymous (you)");
}
