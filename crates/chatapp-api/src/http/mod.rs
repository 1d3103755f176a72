//! HTTP/REST API layer for chatapp.
//!
//! Axum-based REST API at `/api/` with a `{success, message, ...}` response
//! body and permissive CORS for the browser client.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod response;
pub mod router;
