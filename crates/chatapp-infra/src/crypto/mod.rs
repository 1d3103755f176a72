//! Cryptographic operations for chatapp.
//!
//! - `password`: Argon2id password hashing for stored credentials

pub mod password;
