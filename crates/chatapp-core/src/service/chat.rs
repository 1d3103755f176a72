//! Chat service: message sending and history.
//!
//! A send stores one row, then notifies every registered listener with the
//! stored message. Only logged-in senders may send.

use std::sync::Arc;

use chatapp_types::error::ChatError;
use chatapp_types::message::{BROADCAST_RECIPIENT, ChatMessage, NewMessage};
use chrono::Utc;
use tracing::{debug, error};

use crate::event::{ListenerSet, MessageListener};
use crate::repository::message::MessageRepository;
use crate::session::SessionRegistry;

/// Default number of messages returned by history queries.
pub const DEFAULT_HISTORY_LIMIT: u32 = 100;

/// Upper bound on a single history query.
pub const MAX_HISTORY_LIMIT: u32 = 1_000;

pub struct ChatService<M: MessageRepository> {
    message_repo: M,
    sessions: Arc<SessionRegistry>,
    listeners: ListenerSet,
}

impl<M: MessageRepository> ChatService<M> {
    /// Create a chat service sharing the session registry with the auth service.
    pub fn new(message_repo: M, sessions: Arc<SessionRegistry>) -> Self {
        Self {
            message_repo,
            sessions,
            listeners: ListenerSet::new(),
        }
    }

    /// Register a listener for stored messages.
    pub fn add_listener(&mut self, listener: Arc<dyn MessageListener>) {
        self.listeners.add(listener);
    }

    /// Builder-style [`Self::add_listener`].
    pub fn with_listener(mut self, listener: Arc<dyn MessageListener>) -> Self {
        self.add_listener(listener);
        self
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Store a message from `sender` and notify listeners.
    ///
    /// A missing or blank `recipient`, or any casing of `broadcast`, addresses
    /// the message to [`BROADCAST_RECIPIENT`]. Listeners are not called if the insert fails.
    pub async fn send_message(
        &self,
        sender: &str,
        recipient: Option<&str>,
        content: &str,
    ) -> Result<ChatMessage, ChatError> {
        let sender = sender.trim();
        if sender.is_empty() || content.trim().is_empty() {
            return Err(ChatError::MissingFields);
        }

        if !self.sessions.is_active(sender) {
            return Err(ChatError::NotLoggedIn(sender.to_string()));
        }

        let recipient = recipient
            .map(str::trim)
            .filter(|r| !r.is_empty() && !r.eq_ignore_ascii_case(BROADCAST_RECIPIENT))
            .unwrap_or(BROADCAST_RECIPIENT);

        let new_message = NewMessage {
            sender: sender.to_string(),
            recipient: recipient.to_string(),
            content: content.to_string(),
            sent_at: Utc::now(),
        };

        let stored = self.message_repo.insert(&new_message).await.map_err(|e| {
            error!(%sender, %recipient, error = %e, "error sending message");
            ChatError::Storage(e.to_string())
        })?;

        self.sessions.touch(sender);
        debug!(
            message_id = stored.id,
            %sender,
            %recipient,
            listeners = self.listeners.len(),
            "message stored"
        );
        self.listeners.notify(&stored);

        Ok(stored)
    }

    /// Messages between two users, oldest first, capped at `limit`
    /// (clamped to `1..=MAX_HISTORY_LIMIT`).
    pub async fn conversation_history(
        &self,
        user_a: &str,
        user_b: &str,
        limit: u32,
    ) -> Result<Vec<ChatMessage>, ChatError> {
        let limit = limit.clamp(1, MAX_HISTORY_LIMIT);
        self.message_repo
            .conversation(user_a.trim(), user_b.trim(), limit)
            .await
            .map_err(|e| {
                error!(%user_a, %user_b, error = %e, "error retrieving conversation history");
                ChatError::Storage(e.to_string())
            })
    }

    /// Most recent broadcast messages, oldest first.
    pub async fn broadcast_history(&self, limit: u32) -> Result<Vec<ChatMessage>, ChatError> {
        let limit = limit.clamp(1, MAX_HISTORY_LIMIT);
        self.message_repo
            .recent_broadcasts(limit)
            .await
            .map_err(|e| ChatError::Storage(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::testing::MemoryMessageRepository;
    use std::sync::Mutex;

    fn service_with(repo: MemoryMessageRepository) -> (ChatService<MemoryMessageRepository>, Arc<SessionRegistry>) {
        let sessions = Arc::new(SessionRegistry::new());
        (ChatService::new(repo, Arc::clone(&sessions)), sessions)
    }

    #[tokio::test]
    async fn send_requires_login() {
        let (chat, _) = service_with(MemoryMessageRepository::default());

        let err = chat.send_message("alice", None, "hi").await.unwrap_err();

        assert!(matches!(err, ChatError::NotLoggedIn(name) if name == "alice"));
        assert!(chat.message_repo.messages.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn send_requires_sender_and_content() {
        let (chat, sessions) = service_with(MemoryMessageRepository::default());
        sessions.open("alice");

        assert!(matches!(
            chat.send_message("", None, "hi").await,
            Err(ChatError::MissingFields)
        ));
        assert!(matches!(
            chat.send_message("alice", None, "   ").await,
            Err(ChatError::MissingFields)
        ));
    }

    #[tokio::test]
    async fn send_without_recipient_is_broadcast() {
        let (chat, sessions) = service_with(MemoryMessageRepository::default());
        sessions.open("alice");

        let msg = chat.send_message("alice", None, "hello all").await.unwrap();
        assert_eq!(msg.recipient, BROADCAST_RECIPIENT);

        let msg = chat.send_message("alice", Some("  "), "again").await.unwrap();
        assert!(msg.is_broadcast());
    }

    #[tokio::test]
    async fn send_to_broadcast_in_any_case_is_canonical() {
        let (chat, sessions) = service_with(MemoryMessageRepository::default());
        sessions.open("alice");

        let msg = chat.send_message("alice", Some(" Broadcast "), "loud").await.unwrap();
        assert_eq!(msg.recipient, BROADCAST_RECIPIENT);

        chat.send_message("alice", Some("BROADCAST"), "louder").await.unwrap();
        let broadcasts = chat.broadcast_history(10).await.unwrap();
        assert_eq!(broadcasts.len(), 2);
    }

    #[tokio::test]
    async fn listener_count_tracks_registrations() {
        let (mut chat, _) = service_with(MemoryMessageRepository::default());
        assert_eq!(chat.listener_count(), 0);

        chat.add_listener(Arc::new(|_: &ChatMessage| {}));
        let chat = chat.with_listener(Arc::new(|_: &ChatMessage| {}));
        assert_eq!(chat.listener_count(), 2);
    }

    #[tokio::test]
    async fn send_direct_message() {
        let (chat, sessions) = service_with(MemoryMessageRepository::default());
        sessions.open("alice");

        let msg = chat.send_message("alice", Some("bob"), "hey bob").await.unwrap();

        assert_eq!(msg.sender, "alice");
        assert_eq!(msg.recipient, "bob");
        assert_eq!(msg.content, "hey bob");
        assert!(!msg.is_read);
    }

    #[tokio::test]
    async fn send_notifies_listeners_after_insert() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let (chat, sessions) = service_with(MemoryMessageRepository::default());
        let seen_clone = Arc::clone(&seen);
        let chat = chat.with_listener(Arc::new(move |m: &ChatMessage| {
            seen_clone.lock().unwrap().push((m.id, m.sender.clone(), m.content.clone()));
        }));
        sessions.open("alice");

        let msg = chat.send_message("alice", None, "ping").await.unwrap();

        assert_eq!(
            *seen.lock().unwrap(),
            vec![(msg.id, "alice".to_string(), "ping".to_string())]
        );
    }

    #[tokio::test]
    async fn failed_insert_notifies_nobody() {
        let calls = Arc::new(Mutex::new(0u32));
        let (mut chat, sessions) = service_with(MemoryMessageRepository::failing());
        let calls_clone = Arc::clone(&calls);
        chat.add_listener(Arc::new(move |_: &ChatMessage| {
            *calls_clone.lock().unwrap() += 1;
        }));
        sessions.open("alice");

        let err = chat.send_message("alice", None, "lost").await.unwrap_err();

        assert!(matches!(err, ChatError::Storage(_)));
        assert_eq!(*calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn send_touches_sender_session() {
        let (chat, sessions) = service_with(MemoryMessageRepository::default());
        let opened = sessions.open("alice");

        std::thread::sleep(std::time::Duration::from_millis(5));
        chat.send_message("alice", None, "hi").await.unwrap();

        assert!(sessions.get("alice").unwrap().last_active_at > opened.last_active_at);
    }

    #[tokio::test]
    async fn conversation_history_both_directions() {
        let (chat, sessions) = service_with(MemoryMessageRepository::default());
        sessions.open("alice");
        sessions.open("bob");

        chat.send_message("alice", Some("bob"), "1").await.unwrap();
        chat.send_message("bob", Some("alice"), "2").await.unwrap();
        chat.send_message("alice", Some("carol"), "other").await.unwrap();
        chat.send_message("alice", None, "everyone").await.unwrap();

        let history = chat.conversation_history("bob", "alice", 50).await.unwrap();
        let contents: Vec<&str> = history.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["1", "2"]);

        let broadcasts = chat.broadcast_history(10).await.unwrap();
        assert_eq!(broadcasts.len(), 1);
    }

    #[tokio::test]
    async fn conversation_history_limit_keeps_latest() {
        let (chat, sessions) = service_with(MemoryMessageRepository::default());
        sessions.open("alice");
        for i in 0..5 {
            chat.send_message("alice", Some("bob"), &format!("m{i}")).await.unwrap();
        }

        let history = chat.conversation_history("alice", "bob", 2).await.unwrap();
        let contents: Vec<&str> = history.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["m3", "m4"]);

        // A zero limit is clamped up to one.
        assert_eq!(chat.conversation_history("alice", "bob", 0).await.unwrap().len(), 1);
    }
}
