//! Message repository trait definition.
//!
//! Defines the storage interface for chat messages. The infrastructure layer
//! (chatapp-infra) implements this trait with SQLite persistence.

use chatapp_types::error::RepositoryError;
use chatapp_types::message::{ChatMessage, NewMessage};

/// Repository trait for chat message persistence.
pub trait MessageRepository: Send + Sync {
    /// Persist a message and return the stored row.
    fn insert(
        &self,
        msg: &NewMessage,
    ) -> impl std::future::Future<Output = Result<ChatMessage, RepositoryError>> + Send;

    /// Messages exchanged between two users (either direction), oldest first.
    ///
    /// When more than `limit` messages exist, the most recent `limit` are returned.
    fn conversation(
        &self,
        user_a: &str,
        user_b: &str,
        limit: u32,
    ) -> impl std::future::Future<Output = Result<Vec<ChatMessage>, RepositoryError>> + Send;

    /// The most recent `limit` broadcast messages, oldest first.
    fn recent_broadcasts(
        &self,
        limit: u32,
    ) -> impl std::future::Future<Output = Result<Vec<ChatMessage>, RepositoryError>> + Send;
}
