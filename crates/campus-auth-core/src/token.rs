//! Session token issuance and validation
//!
//! Tokens are compact HS256 JWTs over [`Claims`]. Expiry is checked here
//! rather than by `jsonwebtoken` so that the clock can be supplied and no
//! leeway applies: a token is valid up to and including its `exp` second.

use campus_types::{Claims, User};
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::{AuthConfig, AuthError, TokenRejection};

/// A freshly signed token together with the claims it carries
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: Claims,
}

/// Mints signed, expiring tokens for authenticated users.
#[derive(Clone)]
pub struct TokenIssuer {
    key: EncodingKey,
    header: Header,
    ttl_secs: i64,
}

impl TokenIssuer {
    /// Create an issuer from validated configuration.
    ///
    /// # Errors
    /// `AuthError::Configuration` if the signing secret is unusable.
    pub fn new(config: &AuthConfig) -> Result<Self, AuthError> {
        let key = config.signing_key()?;
        Ok(Self {
            key: key.encoding_key(),
            header: Header::new(Algorithm::HS256),
            ttl_secs: config.token_ttl_secs(),
        })
    }

    /// Issue a token valid from now
    pub fn issue(&self, user: &User) -> Result<IssuedToken, AuthError> {
        self.issue_at(user, Utc::now().timestamp())
    }

    /// Issue a token as if the current time were `now` (unix seconds)
    pub fn issue_at(&self, user: &User, now: i64) -> Result<IssuedToken, AuthError> {
        let claims = Claims::for_user(user, now, self.ttl_secs);

        let token = encode(&self.header, &claims, &self.key).map_err(|e| {
            tracing::error!("Failed to sign token: {}", e);
            AuthError::Internal("Failed to sign token".to_string())
        })?;

        Ok(IssuedToken { token, claims })
    }

    /// Lifetime of issued tokens in seconds
    pub fn ttl_secs(&self) -> i64 {
        self.ttl_secs
    }
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}

/// Stateless token verification.
///
/// Needs only the shared secret; never consults the credential store, so a
/// relying party can verify tokens while the issuing authority is down.
#[derive(Clone)]
pub struct TokenValidator {
    key: DecodingKey,
    validation: Validation,
}

impl TokenValidator {
    /// Create a validator from validated configuration
    pub fn new(config: &AuthConfig) -> Result<Self, AuthError> {
        let key = config.signing_key()?;

        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked in `verify_at` against the supplied clock
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Ok(Self {
            key: key.decoding_key(),
            validation,
        })
    }

    /// Verify a token against the current time
    pub fn verify(&self, token: &str) -> Result<Claims, TokenRejection> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// Verify a token as if the current time were `now` (unix seconds).
    ///
    /// Checks run in order: presence, signature, expiry.
    pub fn verify_at(&self, token: &str, now: i64) -> Result<Claims, TokenRejection> {
        if token.trim().is_empty() {
            return Err(TokenRejection::MissingToken);
        }

        let claims = decode::<Claims>(token, &self.key, &self.validation)
            .map_err(|e| {
                tracing::debug!("Token validation failed: {}", e);
                TokenRejection::InvalidSignature
            })?
            .claims;

        if claims.is_expired_at(now) {
            tracing::debug!(exp = claims.exp, now, "Token expired");
            return Err(TokenRejection::Expired);
        }

        Ok(claims)
    }
}

impl std::fmt::Debug for TokenValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenValidator").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
    use campus_types::{Role, UserId};

    fn config(secret: &str) -> AuthConfig {
        AuthConfig::try_new(format!("{secret:0<32}")).unwrap()
    }

    fn student() -> User {
        User::new(101, "student1", Role::Student)
    }

    #[test]
    fn test_issue_then_verify() {
        let config = config("issuer-secret");
        let issuer = TokenIssuer::new(&config).unwrap();
        let validator = TokenValidator::new(&config).unwrap();

        let issued = issuer.issue(&student()).unwrap();
        let claims = validator.verify(&issued.token).unwrap();

        assert_eq!(claims, issued.claims);
        assert_eq!(claims.id, UserId(101));
        assert_eq!(claims.role, Role::Student);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_payload_carries_only_identity_and_timestamps() {
        let issuer = TokenIssuer::new(&config("issuer-secret")).unwrap();
        let issued = issuer.issue_at(&student(), 1_700_000_000).unwrap();

        let payload = issued.token.split('.').nth(1).unwrap();
        let json: serde_json::Value =
            serde_json::from_slice(&URL_SAFE_NO_PAD.decode(payload).unwrap()).unwrap();
        let mut keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        keys.sort();

        assert_eq!(keys, ["exp", "iat", "id", "role", "username"]);
        assert_eq!(json["id"], 101);
        assert_eq!(json["role"], "student");
    }

    #[test]
    fn test_empty_token_is_missing() {
        let validator = TokenValidator::new(&config("issuer-secret")).unwrap();
        assert_eq!(validator.verify(""), Err(TokenRejection::MissingToken));
        assert_eq!(validator.verify("   "), Err(TokenRejection::MissingToken));
    }

    #[test]
    fn test_malformed_token_is_invalid_signature() {
        let validator = TokenValidator::new(&config("issuer-secret")).unwrap();
        for token in ["nodots", "a.b", "a.b.c", "..", "eyJhbGciOiJIUzI1NiJ9.e30."] {
            assert_eq!(
                validator.verify(token),
                Err(TokenRejection::InvalidSignature),
                "token {token:?}"
            );
        }
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issuer = TokenIssuer::new(&config("secret-one")).unwrap();
        let validator = TokenValidator::new(&config("secret-two")).unwrap();

        let issued = issuer.issue(&student()).unwrap();
        assert_eq!(
            validator.verify(&issued.token),
            Err(TokenRejection::InvalidSignature)
        );
    }

    #[test]
    fn test_expiry_boundary() {
        let config = config("issuer-secret");
        let issuer = TokenIssuer::new(&config).unwrap();
        let validator = TokenValidator::new(&config).unwrap();

        let iat = 1_700_000_000;
        let issued = issuer.issue_at(&student(), iat).unwrap();

        assert!(validator.verify_at(&issued.token, iat + 3599).is_ok());
        assert!(validator.verify_at(&issued.token, iat + 3600).is_ok());
        assert_eq!(
            validator.verify_at(&issued.token, iat + 3601),
            Err(TokenRejection::Expired)
        );
    }

    #[test]
    fn test_signature_checked_before_expiry() {
        let issuer = TokenIssuer::new(&config("secret-one")).unwrap();
        let validator = TokenValidator::new(&config("secret-two")).unwrap();

        let issued = issuer.issue_at(&student(), 0).unwrap();
        assert_eq!(
            validator.verify_at(&issued.token, 1_700_000_000),
            Err(TokenRejection::InvalidSignature)
        );
    }

    #[test]
    fn test_unsigned_token_rejected() {
        let validator = TokenValidator::new(&config("issuer-secret")).unwrap();
        // {"alg":"none","typ":"JWT"}.{"id":1,"username":"x","role":"admin","iat":0,"exp":9999999999}
        let token = "eyJhbGciOiJub25lIiwidHlwIjoiSldUIn0.\
                     eyJpZCI6MSwidXNlcm5hbWUiOiJ4Iiwicm9sZSI6ImFkbWluIiwiaWF0IjowLCJleHAiOjk5OTk5OTk5OTl9.";
        assert_eq!(validator.verify(token), Err(TokenRejection::InvalidSignature));
    }
}
