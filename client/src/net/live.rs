//! Live chat feed over the `/ws/chat/{id}` websocket.
//!
//! The socket only signals that something changed; the message list is
//! always re-read over REST so the polled list and the live feed can never
//! disagree. All websocket logic is gated behind `#[cfg(feature = "hydrate")]`.
//!
//! DESIGN
//! ======
//! The connection loop reconnects with exponential backoff (1s doubling to
//! 10s, back to 1s after a connection that delivered frames) and exits once
//! the owning page flips its `alive` flag on unmount.

#[cfg(test)]
#[path = "live_test.rs"]
mod live_test;

#[cfg(feature = "hydrate")]
use std::sync::Arc;
#[cfg(feature = "hydrate")]
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Deserialize;

pub(crate) const INITIAL_BACKOFF_MS: u32 = 1000;
pub(crate) const MAX_BACKOFF_MS: u32 = 10_000;

#[derive(Deserialize)]
struct RawLiveEvent {
    #[serde(rename = "type")]
    kind: String,
}

/// Whether a text frame announces a new message (`{"type":"message",...}`).
pub fn is_message_event(text: &str) -> bool {
    serde_json::from_str::<RawLiveEvent>(text).is_ok_and(|raw| raw.kind == "message")
}

/// Socket URL for `chat_id` relative to the page location.
pub fn live_feed_url(href: &str, host: &str, chat_id: i64) -> String {
    let ws_proto = if href.starts_with("https") { "wss" } else { "ws" };
    format!("{ws_proto}://{host}/ws/chat/{chat_id}")
}

pub(crate) fn next_backoff_ms(current: u32) -> u32 {
    current.saturating_mul(2).min(MAX_BACKOFF_MS)
}

/// Delay before the next reconnect. A connection that delivered frames
/// starts over from the initial delay.
pub(crate) fn reconnect_delay_ms(current: u32, delivered: bool) -> u32 {
    if delivered { INITIAL_BACKOFF_MS } else { current }
}

/// Spawn the live feed for `chat_id` as a local async task.
///
/// `on_message` runs for every message event. The loop stops once `alive`
/// is cleared.
#[cfg(feature = "hydrate")]
pub fn spawn_live_feed<F>(chat_id: i64, alive: Arc<AtomicBool>, on_message: F)
where
    F: Fn() + 'static,
{
    leptos::task::spawn_local(live_feed_loop(chat_id, alive, on_message));
}

#[cfg(feature = "hydrate")]
async fn live_feed_loop<F>(chat_id: i64, alive: Arc<AtomicBool>, on_message: F)
where
    F: Fn() + 'static,
{
    let mut backoff_ms = INITIAL_BACKOFF_MS;

    while alive.load(Ordering::Relaxed) {
        let href = web_sys::window()
            .and_then(|w| w.location().href().ok())
            .unwrap_or_default();
        let host = web_sys::window()
            .and_then(|w| w.location().host().ok())
            .unwrap_or_else(|| "localhost:3000".to_owned());
        let url = live_feed_url(&href, &host, chat_id);

        let delivered = match connect_and_run(&url, &alive, &on_message).await {
            Ok(delivered) => {
                leptos::logging::log!("live feed for chat {chat_id} closed");
                delivered
            }
            Err(e) => {
                leptos::logging::warn!("live feed error for chat {chat_id}: {e}");
                false
            }
        };

        if !alive.load(Ordering::Relaxed) {
            break;
        }
        backoff_ms = reconnect_delay_ms(backoff_ms, delivered);
        gloo_timers::future::sleep(std::time::Duration::from_millis(u64::from(backoff_ms))).await;
        backoff_ms = next_backoff_ms(backoff_ms);
    }
}

/// Read frames until the socket closes or the page unmounts. Returns whether
/// any frame arrived.
#[cfg(feature = "hydrate")]
async fn connect_and_run<F>(url: &str, alive: &Arc<AtomicBool>, on_message: &F) -> Result<bool, String>
where
    F: Fn(),
{
    use std::cell::Cell;

    use futures::StreamExt;
    use gloo_net::websocket::Message;
    use gloo_net::websocket::futures::WebSocket;

    let ws = WebSocket::open(url).map_err(|e| e.to_string())?;
    let (_ws_write, mut ws_read) = ws.split();
    let delivered = Cell::new(false);

    let recv_task = async {
        while let Some(msg) = ws_read.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    delivered.set(true);
                    if is_message_event(&text) {
                        on_message();
                    }
                }
                Ok(Message::Bytes(_)) => delivered.set(true),
                Err(e) => {
                    leptos::logging::warn!("live feed recv error: {e}");
                    break;
                }
            }
        }
    };

    let unmount_watch = async {
        while alive.load(Ordering::Relaxed) {
            gloo_timers::future::sleep(std::time::Duration::from_millis(500)).await;
        }
    };

    futures::future::select(Box::pin(recv_task), Box::pin(unmount_watch)).await;
    Ok(delivered.get())
}
