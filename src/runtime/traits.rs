//! Trait abstractions for runtime I/O
//!
//! The remote assistant sits behind a trait so the runtime can be driven by
//! mocks in tests.

use crate::assistant::{AssistantError, ChatReply, ChatRequest};
use async_trait::async_trait;
use std::sync::Arc;

/// The remote assistant, one query in, one reply out
#[async_trait]
pub trait AssistantClient: Send + Sync {
    async fn reply(&self, request: &ChatRequest) -> Result<ChatReply, AssistantError>;
}

#[async_trait]
impl<T: AssistantClient + ?Sized> AssistantClient for Arc<T> {
    async fn reply(&self, request: &ChatRequest) -> Result<ChatReply, AssistantError> {
        (**self).reply(request).await
    }
}

#[async_trait]
impl<T: AssistantClient + ?Sized> AssistantClient for Box<T> {
    async fn reply(&self, request: &ChatRequest) -> Result<ChatReply, AssistantError> {
        (**self).reply(request).await
    }
}
