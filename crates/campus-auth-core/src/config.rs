//! Configuration types for the token authority

use std::time::Duration;

use crate::crypto::SigningKey;
use crate::AuthError;

/// Default token lifetime
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(60 * 60);

/// Token signing/validation configuration.
///
/// Shared by the issuing authority and by any relying party that verifies
/// tokens locally.
#[derive(Clone)]
pub struct AuthConfig {
    /// HMAC secret shared by issuer and validators
    pub signing_secret: String,
    /// Token lifetime
    pub token_ttl: Duration,
}

impl AuthConfig {
    /// Create a new auth config, rejecting secrets shorter than
    /// [`SigningKey::MIN_KEY_LENGTH`] bytes
    pub fn try_new(signing_secret: impl Into<String>) -> Result<Self, AuthError> {
        let signing_secret = signing_secret.into();
        SigningKey::new(&signing_secret).map_err(|e| AuthError::Configuration(e.to_string()))?;

        Ok(Self {
            signing_secret,
            token_ttl: DEFAULT_TOKEN_TTL,
        })
    }

    /// Set token lifetime
    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    /// Token lifetime in whole seconds
    pub fn token_ttl_secs(&self) -> i64 {
        i64::try_from(self.token_ttl.as_secs()).unwrap_or(i64::MAX)
    }

    pub(crate) fn signing_key(&self) -> Result<SigningKey, AuthError> {
        SigningKey::new(&self.signing_secret).map_err(|e| AuthError::Configuration(e.to_string()))
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("signing_secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}
