//! Auth errors

use thiserror::Error;

/// Why a token was not accepted.
///
/// Callers outside the issuing authority only ever see these collapsed into
/// a single "invalid or expired" outcome.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenRejection {
    /// Token absent or empty
    #[error("missing token")]
    MissingToken,

    /// Malformed, signed with another key, or tampered with
    #[error("invalid token signature")]
    InvalidSignature,

    /// Signature is fine but `exp` has passed
    #[error("token expired")]
    Expired,
}

impl TokenRejection {
    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingToken => "MISSING_TOKEN",
            Self::InvalidSignature => "INVALID_TOKEN",
            Self::Expired => "TOKEN_EXPIRED",
        }
    }

    /// Message shown to callers
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::MissingToken => "No token provided",
            Self::InvalidSignature | Self::Expired => "Invalid or expired token",
        }
    }
}

/// Authentication errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// Unknown user or wrong secret; deliberately does not say which
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Token rejected by the validator
    #[error(transparent)]
    Token(#[from] TokenRejection),

    /// Configuration error (fatal at startup)
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}
