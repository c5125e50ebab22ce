//! Client errors
//!
//! Failures reaching or understanding the issuing authority. A credential
//! rejection is not an error here; it is a normal outcome.

use thiserror::Error;

/// Client errors for issuing-authority calls.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Connection error - refused, reset, DNS failure.
    #[error("connection error: {0}")]
    Connection(String),

    /// Request timeout.
    #[error("request timeout after {0:?}")]
    Timeout(std::time::Duration),

    /// The service answered with a status the protocol does not define.
    #[error("unexpected response status {status}")]
    UnexpectedStatus { status: u16 },

    /// The service answered with a body that could not be decoded.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

impl ClientError {
    /// Map a reqwest failure, recording the configured timeout for timeouts
    pub(crate) fn from_reqwest(err: reqwest::Error, timeout: std::time::Duration) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout)
        } else if err.is_decode() {
            Self::Serialization(err.to_string())
        } else {
            Self::Connection(err.to_string())
        }
    }

    /// Short label for logs and metrics
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Connection(_) => "connection",
            Self::Timeout(_) => "timeout",
            Self::UnexpectedStatus { .. } => "unexpected_status",
            Self::Serialization(_) => "serialization",
            Self::Config(_) => "config",
        }
    }
}
