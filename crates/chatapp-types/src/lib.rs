//! Shared domain types for chatapp.
//!
//! Users, chat messages, login sessions, configuration, and the error enums
//! returned by the service layer.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod config;
pub mod error;
pub mod message;
pub mod session;
pub mod user;
