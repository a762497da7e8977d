//! Scrolling message list for the chat room.
//!
//! Group chats show sender usernames. Anonymous chats hide them and mark the
//! viewer's own messages with "(you)".

#[cfg(test)]
#[path = "message_list_test.rs"]
mod message_list_test;

use leptos::prelude::*;

use crate::net::types::Message;
use crate::state::chat::ChatRoomState;
use crate::util::time::format_timestamp;

/// Author label for `message` as seen by `viewer_id`.
pub fn sender_label(message: &Message, anonymous: bool, viewer_id: Option<i64>) -> String {
    let own = viewer_id == Some(message.sender.id);
    match (anonymous, own) {
        (true, true) => "Anonymous (you)".to_owned(),
        (true, false) => "Anonymous".to_owned(),
        (false, _) => message.sender.username.clone(),
    }
}

#[component]
pub fn MessageList(
    room: RwSignal<ChatRoomState>,
    #[prop(into)] viewer_id: Signal<Option<i64>>,
) -> impl IntoView {
    let messages_ref = NodeRef::<leptos::html::Div>::new();

    Effect::new(move || {
        let _ = room.with(|r| r.messages.len());

        #[cfg(feature = "hydrate")]
        {
            if let Some(el) = messages_ref.get() {
                let scroll_height = el.scroll_height();
                el.set_scroll_top(scroll_height);
            }
        }
    });

    view! {
        <div class="message-list" node_ref=messages_ref>
            {move || {
                let state = room.get();
                if state.messages.is_empty() {
                    return view! { <div class="message-list__empty">"No messages yet"</div> }.into_any();
                }
                let anonymous = state.is_anonymous();
                let viewer = viewer_id.get();
                state
                    .messages
                    .iter()
                    .map(|msg| {
                        let own = viewer == Some(msg.sender.id);
                        let author = sender_label(msg, anonymous, viewer);
                        let time = format_timestamp(&msg.created_at);
                        let content = msg.content.clone();
                        view! {
                            <div class="message-list__message" class:message-list__message--own=own>
                                <span class="message-list__author">{author}</span>
                                <span class="message-list__time">{time}</span>
                                <p class="message-list__content">{content}</p>
                            </div>
                        }
                    })
                    .collect_view()
                    .into_any()
            }}
        </div>
    }
}
