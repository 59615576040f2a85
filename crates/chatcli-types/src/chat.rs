//! Conversation, message, and input-history entities.
//!
//! A conversation is created once per run and owns an append-only message
//! log plus a separate append-only log of raw input lines. Both children are
//! removed with their conversation (`ON DELETE CASCADE`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;

pub use crate::llm::MessageRole;
use crate::llm::ChatTurn;

/// Content of the message seeded into a conversation when no prompt is given.
pub const DEFAULT_SEED_MESSAGE: &str = "You are a helpful assistant.";

/// Surrogate key of a conversation, assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConversationId(pub i64);

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ConversationId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Root entity grouping messages and history entries.
///
/// Never updated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: ConversationId,
    pub created_at: DateTime<Utc>,
}

/// One turn in a conversation.
///
/// Messages are ordered by `id`, which matches insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub role: MessageRole,
    /// Reserved by the schema; no current flow writes it.
    pub name: Option<String>,
    pub content: String,
    pub conversation_id: ConversationId,
}

impl Message {
    /// The `{role, content}` view sent to the chat-completion provider.
    pub fn to_turn(&self) -> ChatTurn {
        ChatTurn {
            role: self.role,
            content: self.content.clone(),
        }
    }
}

/// One raw line of user input, kept for recall.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub value: String,
    pub created_at: DateTime<Utc>,
    pub conversation_id: ConversationId,
}
