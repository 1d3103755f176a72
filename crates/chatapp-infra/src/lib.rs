//! Infrastructure layer for chatapp.
//!
//! Contains implementations of the ports defined in `chatapp-core`:
//! SQLite repositories, Argon2 password hashing, configuration loading and
//! data directory resolution.

pub mod config;
pub mod crypto;
pub mod filesystem;
pub mod sqlite;
