//! Backend endpoint configuration shared by every transport.

use std::time::Duration;

/// Where a backend lives and how long the gateway waits for it.
#[derive(Debug, Clone)]
pub struct EndpointConfig {
    pub url: String,
    /// Upper bound for a single call, connection included.
    pub call_timeout: Duration,
    pub connect_timeout: Duration,
}

impl EndpointConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            call_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
        }
    }

    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }
}

/// Errors raised while building a backend client.
#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    #[error("Invalid backend url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Failed to build backend client: {0}")]
    Client(String),
}
