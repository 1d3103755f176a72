//! SQLite message repository implementation.
//!
//! Implements `MessageRepository` from `chatapp-core` using sqlx with split
//! read/write pools.

use chatapp_core::repository::message::MessageRepository;
use chatapp_types::error::RepositoryError;
use chatapp_types::message::{BROADCAST_RECIPIENT, ChatMessage, NewMessage};
use sqlx::Row;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime};

/// SQLite-backed implementation of `MessageRepository`.
pub struct SqliteMessageRepository {
    pool: DatabasePool,
}

impl SqliteMessageRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Internal row type
// ---------------------------------------------------------------------------

struct MessageRow {
    id: i64,
    sender: String,
    recipient: String,
    content: String,
    sent_at: String,
    is_read: bool,
}

impl MessageRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            sender: row.try_get("sender")?,
            recipient: row.try_get("recipient")?,
            content: row.try_get("content")?,
            sent_at: row.try_get("sent_at")?,
            is_read: row.try_get("is_read")?,
        })
    }

    fn into_message(self) -> Result<ChatMessage, RepositoryError> {
        Ok(ChatMessage {
            id: self.id,
            sender: self.sender,
            recipient: self.recipient,
            content: self.content,
            sent_at: parse_datetime(&self.sent_at)?,
            is_read: self.is_read,
        })
    }
}

fn collect_messages(rows: &[sqlx::sqlite::SqliteRow]) -> Result<Vec<ChatMessage>, RepositoryError> {
    let mut msgs = Vec::with_capacity(rows.len());
    for row in rows {
        let r = MessageRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
        msgs.push(r.into_message()?);
    }
    Ok(msgs)
}

// ---------------------------------------------------------------------------
// MessageRepository impl
// ---------------------------------------------------------------------------

impl MessageRepository for SqliteMessageRepository {
    async fn insert(&self, msg: &NewMessage) -> Result<ChatMessage, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO messages (sender, recipient, content, sent_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&msg.sender)
        .bind(&msg.recipient)
        .bind(&msg.content)
        .bind(format_datetime(&msg.sent_at))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(ChatMessage {
            id: result.last_insert_rowid(),
            sender: msg.sender.clone(),
            recipient: msg.recipient.clone(),
            content: msg.content.clone(),
            sent_at: msg.sent_at,
            is_read: false,
        })
    }

    async fn conversation(
        &self,
        user_a: &str,
        user_b: &str,
        limit: u32,
    ) -> Result<Vec<ChatMessage>, RepositoryError> {
        // Newest `limit` rows, then flipped back to chronological order
        let rows = sqlx::query(
            r#"SELECT * FROM (
                   SELECT * FROM messages
                   WHERE (sender = ? AND recipient = ?)
                      OR (sender = ? AND recipient = ?)
                   ORDER BY sent_at DESC, id DESC
                   LIMIT ?
               )
               ORDER BY sent_at ASC, id ASC"#,
        )
        .bind(user_a)
        .bind(user_b)
        .bind(user_b)
        .bind(user_a)
        .bind(limit as i64)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        collect_messages(&rows)
    }

    async fn recent_broadcasts(&self, limit: u32) -> Result<Vec<ChatMessage>, RepositoryError> {
        let rows = sqlx::query(
            r#"SELECT * FROM (
                   SELECT * FROM messages
                   WHERE recipient = ?
                   ORDER BY sent_at DESC, id DESC
                   LIMIT ?
               )
               ORDER BY sent_at ASC, id ASC"#,
        )
        .bind(BROADCAST_RECIPIENT)
        .bind(limit as i64)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        collect_messages(&rows)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
