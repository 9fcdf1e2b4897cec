//! Chat data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single message within a chat
///
/// Immutable once created; ordered by position in the chat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// A named, ordered sequence of messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    /// Opaque chat identifier
    pub id: String,
    /// Display title, assigned once from the first user message
    pub title: String,
    /// Messages in submission order
    pub messages: Vec<ChatMessage>,
    /// Chat creation time
    pub created_at: DateTime<Utc>,
    /// Last update time
    pub updated_at: DateTime<Utc>,
}

/// Placeholder title until the first submission names the chat
pub const UNTITLED: &str = "New Chat";

impl Chat {
    /// Create a new empty chat with a generated id
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: UNTITLED.to_string(),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Append a message to the chat
    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
        self.updated_at = Utc::now();
    }

    /// Whether the title has not yet been assigned
    pub fn is_untitled(&self) -> bool {
        self.title == UNTITLED
    }
}

impl Default for Chat {
    fn default() -> Self {
        Self::new()
    }
}
