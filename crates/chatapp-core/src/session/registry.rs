//! Username-keyed session registry.
//!
//! Holds one [`Session`] per logged-in user in a `DashMap`. Logging in again
//! replaces the previous session; logging out removes it. There is no expiry
//! policy and nothing is persisted.

use chatapp_types::session::Session;
use chrono::Utc;
use dashmap::DashMap;
use tracing::debug;

/// Concurrent map of active sessions keyed by username.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: DashMap<String, Session>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open (or replace) the session for `username` and return it.
    pub fn open(&self, username: &str) -> Session {
        let session = Session::start(username);
        let replaced = self
            .sessions
            .insert(username.to_string(), session.clone())
            .is_some();
        debug!(%username, replaced, "session opened");
        session
    }

    /// Remove the session for `username`.
    ///
    /// Returns `true` if a session existed. Closing an absent session is a no-op.
    pub fn close(&self, username: &str) -> bool {
        let removed = self.sessions.remove(username).is_some();
        if removed {
            debug!(%username, "session closed");
        }
        removed
    }

    pub fn is_active(&self, username: &str) -> bool {
        self.sessions.contains_key(username)
    }

    /// Record activity for `username`. Returns `false` if not logged in.
    pub fn touch(&self, username: &str) -> bool {
        match self.sessions.get_mut(username) {
            Some(mut session) => {
                session.last_active_at = Utc::now();
                true
            }
            None => false,
        }
    }

    /// Snapshot of the session for `username`, if any.
    pub fn get(&self, username: &str) -> Option<Session> {
        self.sessions.get(username).map(|s| s.value().clone())
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Usernames with an active session, sorted.
    pub fn usernames(&self) -> Vec<String> {
        let mut names: Vec<String> = self.sessions.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }
}
