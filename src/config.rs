//! Client configuration from the environment

use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";

pub const DEFAULT_GREETING: &str =
    "👋 Hello! I'm your AI customer support assistant. How can I help you today?";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base address of the assistant service
    pub api_url: String,
    /// Transport timeout for each request; `None` leaves it to the server
    pub request_timeout: Option<Duration>,
    /// First assistant entry of a new session
    pub greeting: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: None,
            greeting: Some(DEFAULT_GREETING.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("CHAT_API_URL must be an http(s) URL, got {0:?}")]
    InvalidUrl(String),
    #[error("CHAT_REQUEST_TIMEOUT_SECS must be a positive number of seconds, got {0:?}")]
    InvalidTimeout(String),
}

impl ClientConfig {
    /// Read `CHAT_API_URL`, `CHAT_REQUEST_TIMEOUT_SECS` and `CHAT_GREETING`
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a variable is set but unusable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = lookup("CHAT_API_URL") {
            let url = url.trim().to_string();
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidUrl(url));
            }
            config.api_url = url;
        }

        if let Some(raw) = lookup("CHAT_REQUEST_TIMEOUT_SECS") {
            let secs: u64 = raw
                .trim()
                .parse()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ConfigError::InvalidTimeout(raw.clone()))?;
            config.request_timeout = Some(Duration::from_secs(secs));
        }

        // An empty value turns the greeting off
        if let Some(greeting) = lookup("CHAT_GREETING") {
            config.greeting = Some(greeting).filter(|g| !g.trim().is_empty());
        }

        Ok(config)
    }
}
