//! Effects produced by state transitions

use crate::timeline::MessageEntry;

/// Effects to be executed, in order, after a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Drop the current banner
    ClearBanner,

    /// Append an entry to the timeline
    AppendMessage(MessageEntry),

    /// Ask the remote collaborator for a reply
    RequestReply { query: String },

    /// Show a banner
    ShowBanner(String),
}

impl Effect {
    #[must_use]
    pub fn append(entry: MessageEntry) -> Self {
        Effect::AppendMessage(entry)
    }

    #[must_use]
    pub fn request_reply(query: impl Into<String>) -> Self {
        Effect::RequestReply {
            query: query.into(),
        }
    }
}
