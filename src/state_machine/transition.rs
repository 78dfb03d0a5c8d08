//! Pure state transition function
//!
//! Given the same phase and event it always yields the same phase and
//! effects. No I/O happens here.

use super::{Effect, Event, Phase};
use crate::timeline::MessageEntry;
use thiserror::Error;

/// Timeline text for a failed exchange
pub const APOLOGY_TEXT: &str = "❌ Sorry, I'm having trouble connecting. Please try again later.";

/// Banner text for a failed exchange
pub const BANNER_TEXT: &str =
    "Failed to send message. Please make sure the backend server is running.";

/// Result of a state transition
#[derive(Debug, PartialEq, Eq)]
pub struct TransitionResult {
    pub new_state: Phase,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    #[must_use]
    pub fn new(state: Phase) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Rejected events. None of these change state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("Message is empty")]
    EmptyMessage,
    #[error("A reply is still pending, submission dropped")]
    Busy,
    #[error("No request in flight for {0}")]
    UnexpectedReply(&'static str),
}

impl TransitionError {
    /// Validation failures are dropped quietly rather than surfaced
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::EmptyMessage | Self::Busy)
    }
}

pub fn transition(state: &Phase, event: Event) -> Result<TransitionResult, TransitionError> {
    match (state, event) {
        // Guards first: blank text or an in-flight request drop the submission
        (_, Event::Submit { text, .. }) if text.trim().is_empty() => {
            Err(TransitionError::EmptyMessage)
        }
        (Phase::Sending, Event::Submit { .. }) => Err(TransitionError::Busy),

        // Idle + Submit -> Sending (optimistic append before the request)
        (Phase::Idle, Event::Submit { text, at }) => Ok(TransitionResult::new(Phase::Sending)
            .with_effect(Effect::ClearBanner)
            .with_effect(Effect::append(MessageEntry::user(text.clone(), at)))
            .with_effect(Effect::request_reply(text))),

        // Sending + reply -> Idle
        (Phase::Sending, Event::ReplyReceived { text, at }) => {
            Ok(TransitionResult::new(Phase::Idle)
                .with_effect(Effect::append(MessageEntry::assistant(text, at))))
        }

        // Sending + failure -> Idle, with both the flagged entry and the banner
        (Phase::Sending, Event::ReplyFailed { at, .. }) => {
            Ok(TransitionResult::new(Phase::Idle)
                .with_effect(Effect::append(MessageEntry::assistant_error(
                    APOLOGY_TEXT,
                    at,
                )))
                .with_effect(Effect::ShowBanner(BANNER_TEXT.to_string())))
        }

        (Phase::Idle, event @ (Event::ReplyReceived { .. } | Event::ReplyFailed { .. })) => {
            Err(TransitionError::UnexpectedReply(event.name()))
        }
    }
}
