//! Submission progress events
//!
//! An in-process broadcast bus lets front-ends observe the composer without
//! polling it. Emission never blocks: with no subscribers the event is
//! dropped, and a lagging subscriber loses oldest events first.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::types::Post;

pub type EventReceiver = broadcast::Receiver<Event>;

/// Broadcast bus for composer events
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<Event>,
}

impl EventBus {
    /// Create a bus with the given per-subscriber buffer capacity
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> EventReceiver {
        self.sender.subscribe()
    }

    /// Emit an event to all current subscribers (non-blocking)
    pub fn emit(&self, event: Event) {
        // send() errors when nobody is listening, which is fine
        let _ = self.sender.send(event);
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(100)
    }
}

/// Events emitted across the submission lifecycle
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A submission left the composer for the Posts API
    SubmitStarted {
        content_chars: usize,
        media_count: usize,
    },

    /// The Posts API accepted the submission
    SubmitSucceeded {
        /// The created post, verbatim from the backend
        post: Post,
    },

    /// The submission failed (non-2xx, transport, or parse)
    SubmitFailed { error: String },

    /// One or more media candidates were rejected during selection
    MediaRejected { messages: Vec<String> },
}
