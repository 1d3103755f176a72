//! In-process message notification.
//!
//! Listeners registered on the chat service are called synchronously, in
//! registration order, after a message has been stored.

pub mod listener;

pub use listener::{ListenerSet, MessageListener};
