//! Observer-style listeners for newly stored chat messages.

use std::fmt;
use std::sync::Arc;

use chatapp_types::message::ChatMessage;

/// Callback invoked after a message row has been inserted.
///
/// Runs on the request task; implementations should return quickly.
pub trait MessageListener: Send + Sync {
    fn on_message_received(&self, message: &ChatMessage);
}

impl<F> MessageListener for F
where
    F: Fn(&ChatMessage) + Send + Sync,
{
    fn on_message_received(&self, message: &ChatMessage) {
        self(message)
    }
}

/// Ordered collection of listeners.
#[derive(Default, Clone)]
pub struct ListenerSet {
    listeners: Vec<Arc<dyn MessageListener>>,
}

impl ListenerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. Listeners are notified in the order they were added.
    pub fn add(&mut self, listener: Arc<dyn MessageListener>) {
        self.listeners.push(listener);
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Call every listener with `message`.
    pub fn notify(&self, message: &ChatMessage) {
        for listener in &self.listeners {
            listener.on_message_received(message);
        }
    }
}

impl fmt::Debug for ListenerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerSet")
            .field("listener_count", &self.listeners.len())
            .finish()
    }
}
