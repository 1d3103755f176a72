//! In-memory login session record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A logged-in user's session.
///
/// Sessions live only in process memory and never expire on their own; they
/// end on logout or process exit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub username: String,
    /// Regenerated on every successful login.
    pub token: Uuid,
    pub logged_in_at: DateTime<Utc>,
    pub last_active_at: DateTime<Utc>,
}

impl Session {
    /// Start a fresh session for `username`.
    pub fn start(username: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            username: username.into(),
            token: Uuid::now_v7(),
            logged_in_at: now,
            last_active_at: now,
        }
    }
}
