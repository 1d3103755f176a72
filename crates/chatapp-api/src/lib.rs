//! chatapp application layer: CLI commands, REST API, and state wiring.
//!
//! Exposed as a library so the router can be exercised from integration tests;
//! the `chatapp` binary in `main.rs` is a thin dispatcher over these modules.

pub mod cli;
pub mod http;
pub mod state;
