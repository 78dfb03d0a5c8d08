//! Assistant error types

use thiserror::Error;

/// Most characters of a response body quoted in an error message
const BODY_SNIPPET_CHARS: usize = 200;

/// Failure talking to the assistant service.
///
/// The controller treats every kind the same way; the classification only
/// feeds logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AssistantError {
    pub kind: AssistantErrorKind,
    pub message: String,
    /// HTTP status, when the service answered at all
    pub status: Option<u16>,
}

impl AssistantError {
    #[must_use]
    pub fn new(kind: AssistantErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
        }
    }

    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(AssistantErrorKind::Network, message)
    }

    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(AssistantErrorKind::Timeout, message)
    }

    #[must_use]
    pub fn http_status(status: u16, body: &str) -> Self {
        Self {
            status: Some(status),
            ..Self::new(
                AssistantErrorKind::Status,
                format!("HTTP {status}: {}", body_snippet(body)),
            )
        }
    }

    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(AssistantErrorKind::Decode, message)
    }

    #[must_use]
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(AssistantErrorKind::Unknown, message)
    }
}

/// Leading part of a response body, at most `BODY_SNIPPET_CHARS` characters
pub(crate) fn body_snippet(body: &str) -> String {
    let mut chars = body.chars();
    let snippet: String = chars.by_ref().take(BODY_SNIPPET_CHARS).collect();
    if chars.next().is_some() {
        format!("{snippet}... ({} bytes)", body.len())
    } else {
        snippet
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssistantErrorKind {
    /// Connection refused, reset, DNS
    Network,
    /// Transport-level timeout configured on the client
    Timeout,
    /// Non-2xx response
    Status,
    /// Body was not the expected JSON
    Decode,
    Unknown,
}

impl From<reqwest::Error> for AssistantError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            AssistantError::timeout(format!("Request timeout: {e}"))
        } else if e.is_connect() {
            AssistantError::network(format!("Connection failed: {e}"))
        } else if e.is_decode() {
            AssistantError::decode(format!("Failed to read response: {e}"))
        } else {
            AssistantError::unknown(format!("Request failed: {e}"))
        }
    }
}
