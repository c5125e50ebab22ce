//! Client configuration

use std::time::Duration;

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Issuing authority base URL, without trailing slash
    pub auth_url: String,
    /// TCP connect timeout
    pub connect_timeout: Duration,
    /// Whole-request timeout, connect included
    pub request_timeout: Duration,
}

impl ClientConfig {
    /// Create a new client configuration with default timeouts
    pub fn new(auth_url: impl Into<String>) -> Self {
        Self {
            auth_url: auth_url.into().trim_end_matches('/').to_string(),
            connect_timeout: Duration::from_secs(2),
            request_timeout: Duration::from_secs(5),
        }
    }

    /// Set the connect timeout
    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the whole-request timeout
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Check the configuration before building a client
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.auth_url.starts_with("http://") || self.auth_url.starts_with("https://")) {
            return Err(ConfigError::InvalidUrl(self.auth_url.clone()));
        }
        if self.request_timeout.is_zero() || self.connect_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.auth_url, path)
    }
}

/// Configuration error
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("auth service URL must be http(s): {0}")]
    InvalidUrl(String),

    #[error("timeouts must be non-zero")]
    ZeroTimeout,
}
