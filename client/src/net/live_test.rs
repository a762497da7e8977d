use super::*;

#[test]
fn message_events_are_recognized() {
    assert!(is_message_event(r#"{"type":"message","content":"hello","timestamp":"2024-05-01T10:00:00"}"#));
    assert!(is_message_event(r#"{"type":"message"}"#));
}

#[test]
fn other_frames_are_ignored() {
    assert!(!is_message_event(r#"{"type":"typing","content":"x"}"#));
    assert!(!is_message_event(r#"{"content":"no type"}"#));
    assert!(!is_message_event("plain text"));
}

#[test]
fn live_feed_url_matches_page_scheme() {
    assert_eq!(live_feed_url("http://localhost:3000/chat/4", "localhost:3000", 4), "ws://localhost:3000/ws/chat/4");
    assert_eq!(live_feed_url("https://chat.example/chat/4", "chat.example", 4), "wss://chat.example/ws/chat/4");
}

#[test]
fn backoff_doubles_up_to_cap() {
    assert_eq!(next_backoff_ms(INITIAL_BACKOFF_MS), 2000);
    assert_eq!(next_backoff_ms(8000), MAX_BACKOFF_MS);
    assert_eq!(next_backoff_ms(MAX_BACKOFF_MS), MAX_BACKOFF_MS);
}

#[test]
fn delivering_connection_resets_backoff() {
    assert_eq!(reconnect_delay_ms(MAX_BACKOFF_MS, true), INITIAL_BACKOFF_MS);
    assert_eq!(next_backoff_ms(reconnect_delay_ms(MAX_BACKOFF_MS, true)), 2000);
}

#[test]
fn silent_connection_keeps_backing_off() {
    assert_eq!(reconnect_delay_ms(4000, false), 4000);
    assert_eq!(next_backoff_ms(reconnect_delay_ms(8000, false)), MAX_BACKOFF_MS);
}
