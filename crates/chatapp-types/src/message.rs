//! Chat message types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Recipient used when a message does not name one.
pub const BROADCAST_RECIPIENT: &str = "broadcast";

/// A stored chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Database row id.
    pub id: i64,
    pub sender: String,
    /// A username, or [`BROADCAST_RECIPIENT`].
    pub recipient: String,
    pub content: String,
    pub sent_at: DateTime<Utc>,
    #[serde(default)]
    pub is_read: bool,
}

impl ChatMessage {
    /// Whether this message was addressed to everyone.
    pub fn is_broadcast(&self) -> bool {
        self.recipient == BROADCAST_RECIPIENT
    }
}

/// Insert payload for a new message.
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub sender: String,
    pub recipient: String,
    pub content: String,
    pub sent_at: DateTime<Utc>,
}
