//! Remote assistant collaborator
//!
//! Speaks the `/chat` JSON protocol over HTTP and wraps any client with
//! request logging.

mod error;
mod http;
mod types;

pub use error::{AssistantError, AssistantErrorKind};
pub use http::HttpAssistant;
pub use types::*;

use crate::runtime::AssistantClient;
use async_trait::async_trait;

/// Logging wrapper for assistant clients
pub struct LoggingAssistant<C> {
    inner: C,
}

impl<C: AssistantClient> LoggingAssistant<C> {
    #[must_use]
    pub fn new(inner: C) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<C: AssistantClient> AssistantClient for LoggingAssistant<C> {
    async fn reply(&self, request: &ChatRequest) -> Result<ChatReply, AssistantError> {
        let start = std::time::Instant::now();
        let result = self.inner.reply(request).await;
        let duration = start.elapsed();

        match &result {
            Ok(reply) => {
                tracing::info!(
                    session_id = %request.session_id,
                    duration_ms = %duration.as_millis(),
                    response_len = reply.response.len(),
                    "Assistant request completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    session_id = %request.session_id,
                    duration_ms = %duration.as_millis(),
                    error = %e.message,
                    kind = ?e.kind,
                    status = ?e.status,
                    "Assistant request failed"
                );
            }
        }

        result
    }
}
