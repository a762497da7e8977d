use super::*;

#[test]
fn upstream_ws_url_appends_chat_path() {
    assert_eq!(upstream_ws_url("ws://backend:8000", 7), "ws://backend:8000/ws/chat/7");
    assert_eq!(upstream_ws_url("wss://chat.example/", 7), "wss://chat.example/ws/chat/7");
}

#[test]
fn client_text_is_forwarded_upstream() {
    let relay = client_to_upstream(Message::Text("hello".to_owned().into()));
    assert_eq!(relay, Relay::Forward(UpstreamMessage::text("hello".to_owned())));
}

#[test]
fn upstream_text_is_forwarded_to_client() {
    let raw = r#"{"type":"message","content":"hi","timestamp":"2024-05-01T10:00:00"}"#;
    match upstream_to_client(UpstreamMessage::text(raw.to_owned())) {
        Relay::Forward(Message::Text(text)) => assert_eq!(text.as_str(), raw),
        other => panic!("unexpected relay: {other:?}"),
    }
}

#[test]
fn control_frames_stay_local() {
    assert_eq!(client_to_upstream(Message::Ping(Vec::new().into())), Relay::Skip);
    assert!(matches!(upstream_to_client(UpstreamMessage::Pong(Vec::new().into())), Relay::Skip));
}

#[test]
fn close_ends_the_bridge() {
    assert_eq!(client_to_upstream(Message::Close(None)), Relay::Close);
    assert!(matches!(upstream_to_client(UpstreamMessage::Close(None)), Relay::Close));
}
