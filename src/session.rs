//! Session identity
//!
//! A session id scopes one controller instance. It is derived from the wall
//! clock, so uniqueness is only as strong as millisecond resolution.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

const SESSION_PREFIX: &str = "session_";

/// Highest timestamp handed out so far; keeps ids non-decreasing even if
/// the wall clock steps backwards.
static LAST_ISSUED_MILLIS: AtomicI64 = AtomicI64::new(0);

/// Identifier of a single conversation session
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Allocate a new id of the form `session_<millis>`
    #[must_use]
    pub fn create() -> Self {
        let now = chrono::Utc::now().timestamp_millis();
        let previous = LAST_ISSUED_MILLIS.fetch_max(now, Ordering::Relaxed);
        Self(format!("{SESSION_PREFIX}{}", now.max(previous)))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Millisecond component of the id
    #[must_use]
    pub fn millis(&self) -> Option<i64> {
        self.0.strip_prefix(SESSION_PREFIX)?.parse().ok()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SessionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
