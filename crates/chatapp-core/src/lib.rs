//! Business logic and repository trait definitions for chatapp.
//!
//! This crate defines the "ports" (repository traits, password hashing) that
//! the infrastructure layer implements, plus the in-memory session registry
//! and message listener mechanism. It depends only on `chatapp-types` --
//! never on `chatapp-infra` or any database/IO crate.

pub mod event;
pub mod repository;
pub mod service;
pub mod session;
