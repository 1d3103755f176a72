//! User account types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum accepted username length in characters.
pub const MAX_USERNAME_LEN: usize = 64;

/// A registered chat user.
///
/// The password hash is deliberately absent; see [`UserCredentials`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Database row id.
    pub id: i64,
    /// Unique login name.
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Inactive users cannot log in.
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// A user together with the stored password hash, used only for verification.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    /// PHC-formatted password hash.
    pub password_hash: String,
}

/// Insert payload for a new user. The password must already be hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub email: Option<String>,
}

/// Check a (trimmed) username against the naming rules.
///
/// Usernames are 1..=64 characters of ASCII letters, digits, `_`, `.` or `-`.
/// Returns a human-readable reason on failure.
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.is_empty() {
        return Err("username cannot be empty".to_string());
    }
    if username.chars().count() > MAX_USERNAME_LEN {
        return Err(format!(
            "username must be at most {MAX_USERNAME_LEN} characters"
        ));
    }
    if let Some(c) = username
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')))
    {
        return Err(format!("username contains invalid character '{c}'"));
    }
    Ok(())
}
