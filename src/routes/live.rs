//! WebSocket bridge for the live chat feed.
//!
//! DESIGN
//! ======
//! On upgrade, opens a second socket to `CHAT_WS_URL/ws/chat/{id}` and
//! relays text and binary frames both ways in a `select!` loop. Pings and
//! pongs stay local to each leg. The bridge ends when either side closes or
//! errors; the other side is then closed too.

#[cfg(test)]
#[path = "live_test.rs"]
mod live_test;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, State};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use tokio_tungstenite::tungstenite::Message as UpstreamMessage;
use tracing::{info, warn};

use crate::state::AppState;

/// What to do with a frame arriving on one leg of the bridge.
#[derive(Debug, PartialEq)]
pub enum Relay<M> {
    Forward(M),
    Skip,
    Close,
}

pub fn upstream_ws_url(base: &str, chat_id: i64) -> String {
    format!("{}/ws/chat/{chat_id}", base.trim_end_matches('/'))
}

pub fn client_to_upstream(msg: Message) -> Relay<UpstreamMessage> {
    match msg {
        Message::Text(text) => Relay::Forward(UpstreamMessage::text(text.as_str().to_owned())),
        Message::Binary(bytes) => Relay::Forward(UpstreamMessage::binary(bytes)),
        Message::Ping(_) | Message::Pong(_) => Relay::Skip,
        Message::Close(_) => Relay::Close,
    }
}

pub fn upstream_to_client(msg: UpstreamMessage) -> Relay<Message> {
    match msg {
        UpstreamMessage::Text(text) => Relay::Forward(Message::Text(text.as_str().to_owned().into())),
        UpstreamMessage::Binary(bytes) => Relay::Forward(Message::Binary(bytes)),
        UpstreamMessage::Ping(_) | UpstreamMessage::Pong(_) | UpstreamMessage::Frame(_) => Relay::Skip,
        UpstreamMessage::Close(_) => Relay::Close,
    }
}

pub async fn handle_ws(
    ws: WebSocketUpgrade,
    Path(chat_id): Path<i64>,
    State(state): State<AppState>,
) -> Response {
    let url = upstream_ws_url(&state.config.chat_ws_url, chat_id);
    ws.on_upgrade(move |socket| run_bridge(socket, url, chat_id))
}

async fn run_bridge(mut client: WebSocket, url: String, chat_id: i64) {
    let mut upstream = match tokio_tungstenite::connect_async(url.as_str()).await {
        Ok((stream, _)) => stream,
        Err(e) => {
            warn!(chat_id, %url, error = %e, "live: upstream connect failed");
            let _ = client.send(Message::Close(None)).await;
            return;
        }
    };

    info!(chat_id, "live: bridge opened");

    loop {
        tokio::select! {
            msg = client.recv() => {
                let Some(Ok(msg)) = msg else { break };
                match client_to_upstream(msg) {
                    Relay::Forward(frame) => {
                        if upstream.send(frame).await.is_err() {
                            break;
                        }
                    }
                    Relay::Skip => {}
                    Relay::Close => break,
                }
            }
            msg = upstream.next() => {
                let Some(Ok(msg)) = msg else { break };
                match upstream_to_client(msg) {
                    Relay::Forward(frame) => {
                        if client.send(frame).await.is_err() {
                            break;
                        }
                    }
                    Relay::Skip => {}
                    Relay::Close => break,
                }
            }
        }
    }

    let _ = upstream.close(None).await;
    let _ = client.send(Message::Close(None)).await;
    info!(chat_id, "live: bridge closed");
}
