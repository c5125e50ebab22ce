//! Auth service - ties together credential lookup, token issuance and validation

use campus_types::Claims;
use std::sync::Arc;

use crate::{
    config::AuthConfig,
    credentials::CredentialStore,
    token::{IssuedToken, TokenIssuer, TokenValidator},
    AuthError, TokenRejection,
};

/// The issuing authority.
///
/// Only this service may mint tokens: it is the sole holder of both the
/// credential store and a [`TokenIssuer`].
pub struct AuthService<C: CredentialStore> {
    issuer: TokenIssuer,
    validator: TokenValidator,
    store: Arc<C>,
}

impl<C: CredentialStore> AuthService<C> {
    /// Create a new auth service
    pub fn new(config: &AuthConfig, store: Arc<C>) -> Result<Self, AuthError> {
        Ok(Self {
            issuer: TokenIssuer::new(config)?,
            validator: TokenValidator::new(config)?,
            store,
        })
    }

    /// Check credentials and issue a token for the matching user
    pub async fn login(&self, username: &str, password: &str) -> Result<IssuedToken, AuthError> {
        let Some(user) = self.store.find_user(username, password).await? else {
            tracing::info!(username, "Login failed: invalid credentials");
            return Err(AuthError::InvalidCredentials);
        };

        let issued = self.issuer.issue(&user)?;
        tracing::info!(
            user_id = %user.id,
            username = %user.username,
            role = %user.role,
            exp = issued.claims.exp,
            "Token issued"
        );
        Ok(issued)
    }

    /// Validate a token without touching the credential store
    pub fn validate(&self, token: &str) -> Result<Claims, TokenRejection> {
        self.validator.verify(token).inspect_err(|rejection| {
            tracing::debug!(reason = rejection.error_code(), "Token rejected");
        })
    }

    /// Token lifetime in seconds
    pub fn token_ttl_secs(&self) -> i64 {
        self.issuer.ttl_secs()
    }
}

impl<C: CredentialStore> std::fmt::Debug for AuthService<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("issuer", &self.issuer)
            .finish_non_exhaustive()
    }
}
