//! In-memory repository and hasher fakes shared by service tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use chatapp_types::error::{AuthError, RepositoryError};
use chatapp_types::message::{ChatMessage, NewMessage};
use chatapp_types::user::{NewUser, User, UserCredentials};
use chrono::Utc;

use crate::repository::message::MessageRepository;
use crate::repository::user::UserRepository;
use crate::service::hash::PasswordHasher;

/// Reversible "hash" so tests can assert what was stored.
pub struct PlainHasher;

impl PasswordHasher for PlainHasher {
    async fn hash(&self, password: &str) -> Result<String, AuthError> {
        Ok(format!("plain${password}"))
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        Ok(hash == format!("plain${password}"))
    }
}

#[derive(Default)]
pub struct MemoryUserRepository {
    pub users: Mutex<Vec<UserCredentials>>,
    pub fail: AtomicBool,
}

impl MemoryUserRepository {
    pub fn failing() -> Self {
        let repo = Self::default();
        repo.fail.store(true, Ordering::SeqCst);
        repo
    }

    fn check(&self) -> Result<(), RepositoryError> {
        if self.fail.load(Ordering::SeqCst) {
            Err(RepositoryError::Query("database is down".to_string()))
        } else {
            Ok(())
        }
    }

    pub fn deactivate(&self, username: &str) {
        let mut users = self.users.lock().unwrap();
        if let Some(creds) = users.iter_mut().find(|c| c.user.username == username) {
            creds.user.is_active = false;
        }
    }
}

impl UserRepository for MemoryUserRepository {
    async fn create(&self, user: &NewUser) -> Result<User, RepositoryError> {
        self.check()?;
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|c| c.user.username == user.username) {
            return Err(RepositoryError::Conflict(format!(
                "username '{}' already exists",
                user.username
            )));
        }
        let created = User {
            id: users.len() as i64 + 1,
            username: user.username.clone(),
            email: user.email.clone(),
            is_active: true,
            created_at: Utc::now(),
        };
        users.push(UserCredentials {
            user: created.clone(),
            password_hash: user.password_hash.clone(),
        });
        Ok(created)
    }

    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<UserCredentials>, RepositoryError> {
        self.check()?;
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|c| c.user.username == username).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        self.check()?;
        let mut users: Vec<User> = self
            .users
            .lock()
            .unwrap()
            .iter()
            .map(|c| c.user.clone())
            .collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }
}

#[derive(Default)]
pub struct MemoryMessageRepository {
    pub messages: Mutex<Vec<ChatMessage>>,
    pub fail: AtomicBool,
}

impl MemoryMessageRepository {
    pub fn failing() -> Self {
        let repo = Self::default();
        repo.fail.store(true, Ordering::SeqCst);
        repo
    }
}

impl MessageRepository for MemoryMessageRepository {
    async fn insert(&self, msg: &NewMessage) -> Result<ChatMessage, RepositoryError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(RepositoryError::Query("database is down".to_string()));
        }
        let mut messages = self.messages.lock().unwrap();
        let stored = ChatMessage {
            id: messages.len() as i64 + 1,
            sender: msg.sender.clone(),
            recipient: msg.recipient.clone(),
            content: msg.content.clone(),
            sent_at: msg.sent_at,
            is_read: false,
        };
        messages.push(stored.clone());
        Ok(stored)
    }

    async fn conversation(
        &self,
        user_a: &str,
        user_b: &str,
        limit: u32,
    ) -> Result<Vec<ChatMessage>, RepositoryError> {
        let messages = self.messages.lock().unwrap();
        let matching: Vec<ChatMessage> = messages
            .iter()
            .filter(|m| {
                (m.sender == user_a && m.recipient == user_b)
                    || (m.sender == user_b && m.recipient == user_a)
            })
            .cloned()
            .collect();
        let skip = matching.len().saturating_sub(limit as usize);
        Ok(matching.into_iter().skip(skip).collect())
    }

    async fn recent_broadcasts(&self, limit: u32) -> Result<Vec<ChatMessage>, RepositoryError> {
        let messages = self.messages.lock().unwrap();
        let matching: Vec<ChatMessage> =
            messages.iter().filter(|m| m.is_broadcast()).cloned().collect();
        let skip = matching.len().saturating_sub(limit as usize);
        Ok(matching.into_iter().skip(skip).collect())
    }
}
