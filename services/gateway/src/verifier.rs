//! Access verification for protected pages

use campus_auth_core::{AuthError, TokenValidator};
use chrono::Utc;
use campus_client::{AuthClient, ClientError, ValidateOutcome};
use campus_types::Claims;

use crate::config::VerificationMode;

/// What the gateway should do with a presented session token
#[derive(Debug)]
pub enum AccessDecision {
    /// Token is genuine and unexpired
    Granted(Claims),
    /// Token is forged, malformed or expired
    Denied { reason: String },
    /// The issuing authority could not answer; the token's status is unknown
    Unavailable(ClientError),
}

/// Token verification strategy
#[derive(Debug, Clone)]
pub enum AccessVerifier {
    /// Signature and expiry checked in-process; works while the issuing
    /// authority is down
    Local(TokenValidator),
    /// Every check is a `POST /validate` round trip
    Remote(AuthClient),
}

impl AccessVerifier {
    /// Build the verifier selected by configuration
    pub fn from_mode(mode: &VerificationMode, client: &AuthClient) -> Result<Self, AuthError> {
        Ok(match mode {
            VerificationMode::Local(config) => Self::Local(TokenValidator::new(config)?),
            VerificationMode::Remote => Self::Remote(client.clone()),
        })
    }

    pub async fn verify(&self, token: &str) -> AccessDecision {
        match self {
            Self::Local(validator) => match validator.verify(token) {
                Ok(claims) => AccessDecision::Granted(claims),
                Err(rejection) => AccessDecision::Denied {
                    reason: rejection.error_code().to_string(),
                },
            },
            Self::Remote(client) => match client.validate(token).await {
                ValidateOutcome::Valid(claims) => AccessDecision::Granted(claims),
                ValidateOutcome::Invalid { message } => AccessDecision::Denied { reason: message },
                ValidateOutcome::Unreachable(err) => AccessDecision::Unavailable(err),
            },
        }
    }

    /// Cookie lifetime for a freshly issued token.
    ///
    /// With local verification the lifetime runs to the token's own `exp`;
    /// remote mode cannot read the token and uses `fallback_secs`.
    pub fn session_max_age(&self, token: &str, fallback_secs: u64) -> u64 {
        let Self::Local(validator) = self else {
            return fallback_secs;
        };

        let now = Utc::now().timestamp();
        match validator.verify_at(token, now) {
            Ok(claims) => u64::try_from(claims.remaining_secs(now)).unwrap_or(0),
            Err(rejection) => {
                tracing::warn!(
                    reason = rejection.error_code(),
                    "Freshly issued token failed local verification; check JWT_SECRET"
                );
                fallback_secs
            }
        }
    }

    pub fn mode(&self) -> &'static str {
        match self {
            Self::Local(_) => "local",
            Self::Remote(_) => "remote",
        }
    }
}
