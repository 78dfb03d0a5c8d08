//! Events that drive the controller

use chrono::{DateTime, Utc};

/// Events that trigger state transitions.
///
/// Each carries the time it was observed so the transition stays pure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    // User events
    Submit {
        text: String,
        at: DateTime<Utc>,
    },

    // Remote collaborator events
    ReplyReceived {
        text: String,
        at: DateTime<Utc>,
    },
    ReplyFailed {
        /// Diagnostic detail, logged but never shown verbatim
        reason: String,
        at: DateTime<Utc>,
    },
}

impl Event {
    #[must_use]
    pub fn submit(text: impl Into<String>) -> Self {
        Event::Submit {
            text: text.into(),
            at: Utc::now(),
        }
    }

    #[must_use]
    pub fn reply_received(text: impl Into<String>) -> Self {
        Event::ReplyReceived {
            text: text.into(),
            at: Utc::now(),
        }
    }

    #[must_use]
    pub fn reply_failed(reason: impl Into<String>) -> Self {
        Event::ReplyFailed {
            reason: reason.into(),
            at: Utc::now(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Event::Submit { .. } => "submit",
            Event::ReplyReceived { .. } => "reply_received",
            Event::ReplyFailed { .. } => "reply_failed",
        }
    }
}
