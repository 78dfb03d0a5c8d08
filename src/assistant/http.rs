//! HTTP implementation of the assistant collaborator

use super::error::body_snippet;
use super::{
    AssistantError, ChatReply, ChatRequest, EscalateReply, EscalateRequest, HealthStatus,
};
use crate::config::ClientConfig;
use crate::runtime::AssistantClient;
use crate::session::SessionId;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Talks to the assistant service over HTTP/JSON
#[derive(Debug, Clone)]
pub struct HttpAssistant {
    client: Client,
    base_url: String,
}

impl HttpAssistant {
    /// # Errors
    ///
    /// Fails if the underlying HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, AssistantError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AssistantError::unknown(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    /// Liveness check against `GET /health`
    ///
    /// # Errors
    ///
    /// Any transport failure, non-2xx status or unexpected body.
    pub async fn health(&self) -> Result<HealthStatus, AssistantError> {
        let response = self.client.get(self.endpoint("health")).send().await?;
        read_json(response).await
    }

    /// Ask the service for a hand-off summary of this session
    ///
    /// # Errors
    ///
    /// Any transport failure, non-2xx status or unexpected body.
    pub async fn escalate(&self, session_id: &SessionId) -> Result<EscalateReply, AssistantError> {
        let request = EscalateRequest {
            session_id: session_id.clone(),
        };
        self.post_json("escalate", &request).await
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, AssistantError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.endpoint(path))
            .json(body)
            .send()
            .await?;
        read_json(response).await
    }
}

async fn read_json<R: DeserializeOwned>(response: reqwest::Response) -> Result<R, AssistantError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(AssistantError::http_status(status.as_u16(), &body));
    }

    serde_json::from_str(&body).map_err(|e| {
        AssistantError::decode(format!(
            "Failed to parse response: {e} - body: {}",
            body_snippet(&body)
        ))
    })
}

#[async_trait]
impl AssistantClient for HttpAssistant {
    async fn reply(&self, request: &ChatRequest) -> Result<ChatReply, AssistantError> {
        self.post_json("chat", request).await
    }
}
