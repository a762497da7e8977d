//! Shared REST DTOs for the client/server boundary.
//!
//! DESIGN
//! ======
//! These types mirror the chat service's JSON payloads. Optional and list
//! fields tolerate omission so partial responses (for example a `User`
//! nested inside a participant record) still decode.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

// =============================================================================
// ENTITIES
// =============================================================================

/// An account as returned by `/api/users/me/` and nested in chats/messages.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Server-assigned numeric identifier.
    pub id: i64,
    /// Login / display name. Anonymous accounts are prefixed `anon_`.
    pub username: String,
    pub email: Option<String>,
    pub age: Option<u32>,
    pub gender: Option<String>,
    /// Account role (`USER`, `ANONYMOUS`, `ADMIN`).
    pub role: Option<String>,
    #[serde(default)]
    pub interests: Vec<Interest>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// A tag used to filter and match chats.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interest {
    pub id: i64,
    /// Human-readable label; also the value sent in filters.
    pub interest: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Chat discriminator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChatType {
    #[default]
    Group,
    Anonymous,
}

impl ChatType {
    pub fn label(self) -> &'static str {
        match self {
            Self::Group => "Group",
            Self::Anonymous => "Anonymous",
        }
    }
}

/// Membership record wrapping a user and the time they joined.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: i64,
    pub user: User,
    pub joined_at: Option<String>,
}

/// Interest attached to a chat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatInterest {
    pub id: i64,
    pub interest: Interest,
    pub added_at: Option<String>,
}

/// A group or anonymous chat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    /// Display name; anonymous chats usually have none.
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: ChatType,
    /// Participants in join order.
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub interests: Vec<ChatInterest>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Chat {
    pub fn is_anonymous(&self) -> bool {
        self.kind == ChatType::Anonymous
    }

    /// Title shown in headers and cards.
    pub fn display_name(&self) -> String {
        match self.kind {
            ChatType::Anonymous => "Anonymous chat".to_owned(),
            ChatType::Group => self
                .name
                .as_deref()
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .unwrap_or("Untitled chat")
                .to_owned(),
        }
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    /// Whether `user_id` appears among the participants.
    pub fn has_participant(&self, user_id: i64) -> bool {
        self.participants.iter().any(|p| p.user.id == user_id)
    }

    /// Interest labels in server order.
    pub fn interest_labels(&self) -> Vec<String> {
        self.interests
            .iter()
            .map(|ci| ci.interest.interest.clone())
            .collect()
    }
}

/// A chat message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub content: String,
    pub sender: User,
    /// Owning chat id. The service sends either the id or the nested chat.
    #[serde(default, deserialize_with = "deserialize_chat_ref")]
    pub chat: Option<i64>,
    #[serde(default)]
    pub created_at: String,
    pub updated_at: Option<String>,
}

// =============================================================================
// AUTH PAYLOADS
// =============================================================================

/// Access/refresh pair from `/api/token/`, `/api/users/register/`, and
/// `/api/users/anonymous/`. The refresh endpoint returns only `access`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoginData {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RegisterData {
    pub username: String,
    pub password: String,
    pub email: String,
    pub age: u32,
    pub gender: String,
    pub interests: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AnonymousUserData {
    pub username: String,
    pub gender: String,
    pub age: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct RefreshRequest<'a> {
    pub refresh: &'a str,
}

/// Editable profile fields sent as a partial update.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
}

// =============================================================================
// CHAT PAYLOADS
// =============================================================================

/// Matching preferences for `/api/chats/find_anonymous_chat/`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AnonymousChatFilters {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub interests: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_age: Option<u32>,
}

/// Search criteria for `/api/chats/group_chats/`, sent as a query string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GroupChatFilters {
    pub name: String,
    pub min_participants: u32,
    pub interests: Vec<String>,
}

impl GroupChatFilters {
    /// Query pairs for the request. Empty name and zero minimum are omitted;
    /// each interest becomes its own `interests=` pair.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        let name = self.name.trim();
        if !name.is_empty() {
            pairs.push(("name", name.to_owned()));
        }
        if self.min_participants > 0 {
            pairs.push(("min_participants", self.min_participants.to_string()));
        }
        for interest in &self.interests {
            pairs.push(("interests", interest.clone()));
        }
        pairs
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CreateGroupChat {
    pub name: String,
    pub interest_names: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct SendMessage<'a> {
    pub chat: i64,
    pub content: &'a str,
}

/// Result of `/api/chats/{id}/leave_chat/`.
///
/// Anonymous accounts are deleted by the service when they leave; the
/// response then carries `user_deleted: true`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct LeaveOutcome {
    #[serde(default)]
    pub user_deleted: bool,
    pub message: Option<String>,
}

fn deserialize_chat_ref<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::Number(number)) => number
            .as_i64()
            .map(Some)
            .ok_or_else(|| D::Error::custom("chat id out of range")),
        Some(serde_json::Value::Object(map)) => Ok(map.get("id").and_then(serde_json::Value::as_i64)),
        Some(_) => Err(D::Error::custom("expected chat id or chat object")),
    }
}
