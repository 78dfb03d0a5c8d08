//! Controller state types

use crate::session::SessionId;
use serde::{Deserialize, Serialize};

/// Request lifecycle phase
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Phase {
    /// Ready for input, nothing in flight
    #[default]
    Idle,

    /// One request in flight
    Sending,
}

impl Phase {
    /// The busy indicator shown to the user
    #[must_use]
    pub fn is_busy(&self) -> bool {
        matches!(self, Phase::Sending)
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Sending => "sending",
        }
    }
}

/// Immutable per-session context, fixed at construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub session_id: SessionId,
    /// Seeded as the first assistant entry when present
    pub greeting: Option<String>,
}

impl SessionContext {
    #[must_use]
    pub fn new(session_id: SessionId) -> Self {
        Self {
            session_id,
            greeting: None,
        }
    }

    /// Seed the timeline with an assistant greeting. Blank greetings are ignored.
    #[must_use]
    pub fn with_greeting(mut self, greeting: impl Into<String>) -> Self {
        let greeting = greeting.into();
        self.greeting = if greeting.trim().is_empty() {
            None
        } else {
            Some(greeting)
        };
        self
    }
}
