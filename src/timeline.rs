//! Append-only message timeline

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Who authored a timeline entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Assistant,
}

/// One transcript entry. Entries are never modified once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageEntry {
    pub text: String,
    pub sender: Sender,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub is_error: bool,
}

impl MessageEntry {
    #[must_use]
    pub fn user(text: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::User,
            created_at,
            is_error: false,
        }
    }

    #[must_use]
    pub fn assistant(text: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Assistant,
            created_at,
            is_error: false,
        }
    }

    /// Assistant-side entry flagged as a failed exchange
    #[must_use]
    pub fn assistant_error(text: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            is_error: true,
            ..Self::assistant(text, created_at)
        }
    }
}

/// Immutable view of the timeline at one point in time
pub type TimelineSnapshot = Arc<[MessageEntry]>;

/// Ordered, append-only sequence of entries.
///
/// There is deliberately no way to remove or edit an entry.
#[derive(Debug, Default)]
pub struct Timeline {
    entries: Vec<MessageEntry>,
}

impl Timeline {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, returning its position
    pub fn append(&mut self, entry: MessageEntry) -> usize {
        self.entries.push(entry);
        self.entries.len() - 1
    }

    #[must_use]
    pub fn snapshot(&self) -> TimelineSnapshot {
        Arc::from(self.entries.as_slice())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
