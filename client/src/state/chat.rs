//! Chat room state shared by the chat page and its message list.
//!
//! SYSTEM CONTEXT
//! ==============
//! The room is fed by three sources: the initial load, the 5s poll, and
//! live-feed refetches. All of them replace the message list wholesale;
//! only a locally sent message is appended, deduplicated by id so the next
//! refetch never shows it twice.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use crate::net::types::{Chat, Message};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChatRoomState {
    pub chat: Option<Chat>,
    pub messages: Vec<Message>,
    /// Whether the current user is among the chat participants.
    pub is_participant: bool,
    pub loading: bool,
    /// Inline error shown above the message list.
    pub error: Option<String>,
}

impl ChatRoomState {
    /// Store a freshly loaded chat and recompute participation for `user_id`.
    pub fn set_chat(&mut self, chat: Chat, user_id: Option<i64>) {
        self.is_participant = user_id.is_some_and(|id| chat.has_participant(id));
        self.chat = Some(chat);
    }

    pub fn replace_messages(&mut self, messages: Vec<Message>) {
        self.messages = messages;
    }

    /// Append a message unless one with the same id is already listed.
    pub fn push_message(&mut self, message: Message) {
        if self.messages.iter().all(|m| m.id != message.id) {
            self.messages.push(message);
        }
    }

    pub fn is_anonymous(&self) -> bool {
        self.chat.as_ref().is_some_and(Chat::is_anonymous)
    }

    /// Anonymous chats wait for a second participant.
    pub fn waiting_for_partner(&self) -> bool {
        self.chat
            .as_ref()
            .is_some_and(|c| c.is_anonymous() && c.participant_count() <= 1)
    }
}
