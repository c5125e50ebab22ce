//! Cryptographic utilities for secure operations
//!
//! Signing keys for session tokens and salted one-way hashing of user
//! secrets. Both are security-critical: keys are validated once at startup,
//! and secret verification must not leak timing information.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use jsonwebtoken::{DecodingKey, EncodingKey};
use rand_core::OsRng;
use std::sync::Arc;

use crate::AuthError;

/// Pre-validated HMAC secret used to sign and verify tokens.
#[derive(Clone)]
pub struct SigningKey {
    key_bytes: Arc<[u8]>,
}

impl SigningKey {
    /// Minimum allowed key length in bytes (256 bits)
    pub const MIN_KEY_LENGTH: usize = 32;

    /// Create a new signing key from bytes.
    ///
    /// # Errors
    /// Returns error if key is too short (less than 32 bytes).
    pub fn new(key: impl AsRef<[u8]>) -> Result<Self, SigningKeyError> {
        let key_bytes = key.as_ref();
        if key_bytes.len() < Self::MIN_KEY_LENGTH {
            return Err(SigningKeyError::KeyTooShort {
                actual: key_bytes.len(),
                minimum: Self::MIN_KEY_LENGTH,
            });
        }
        Ok(Self {
            key_bytes: Arc::from(key_bytes),
        })
    }

    /// Key for producing HS256 signatures
    pub fn encoding_key(&self) -> EncodingKey {
        EncodingKey::from_secret(&self.key_bytes)
    }

    /// Key for checking HS256 signatures
    pub fn decoding_key(&self) -> DecodingKey {
        DecodingKey::from_secret(&self.key_bytes)
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKey")
            .field("key_length", &self.key_bytes.len())
            .finish_non_exhaustive()
    }
}

/// Errors that can occur when creating a signing key
#[derive(Debug, Clone, thiserror::Error)]
pub enum SigningKeyError {
    #[error("signing key too short: got {actual} bytes, need at least {minimum}")]
    KeyTooShort { actual: usize, minimum: usize },
}

/// Salted Argon2id hashing of user secrets.
///
/// Produces PHC strings (`$argon2id$v=19$m=..,t=..,p=..$salt$hash`), which
/// carry their own parameters, so verification works for hashes produced
/// with any cost settings.
#[derive(Clone)]
pub struct SecretHasher {
    argon2: Argon2<'static>,
}

impl Default for SecretHasher {
    fn default() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }
}

impl SecretHasher {
    /// Hasher with explicit Argon2id cost parameters
    ///
    /// * `m_cost` - memory in KiB
    /// * `t_cost` - iterations
    /// * `p_cost` - lanes
    pub fn with_params(m_cost: u32, t_cost: u32, p_cost: u32) -> Result<Self, AuthError> {
        let params = Params::new(m_cost, t_cost, p_cost, None)
            .map_err(|e| AuthError::Configuration(format!("invalid argon2 params: {e}")))?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hash a secret with a fresh random salt
    pub fn hash(&self, secret: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(secret.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::Internal(format!("secret hashing failed: {e}")))
    }
}

impl From<HashSettings> for SecretHasher {
    fn from(settings: HashSettings) -> Self {
        Self {
            argon2: Argon2::new(settings.algorithm, settings.version, settings.params),
        }
    }
}

impl std::fmt::Debug for SecretHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretHasher").finish_non_exhaustive()
    }
}

/// Check `secret` against a PHC hash string.
///
/// The digest comparison inside `argon2` is constant-time. An unparseable
/// hash never matches.
pub fn verify_secret(secret: &str, phc_hash: &str) -> bool {
    PasswordHash::new(phc_hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(secret.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

/// Argon2 variant, version and cost parameters recorded in a PHC string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashSettings {
    algorithm: Algorithm,
    version: Version,
    params: Params,
}

/// Read the Argon2 settings out of a PHC hash string.
///
/// # Errors
/// `AuthError::Configuration` if the string is not an Argon2 PHC hash.
pub fn hash_settings(phc_hash: &str) -> Result<HashSettings, AuthError> {
    let parsed = PasswordHash::new(phc_hash).map_err(invalid_hash)?;
    let algorithm = Algorithm::try_from(parsed.algorithm).map_err(invalid_hash)?;
    let version = match parsed.version {
        Some(raw) => Version::try_from(raw).map_err(invalid_hash)?,
        None => Version::default(),
    };
    let params = Params::try_from(&parsed).map_err(invalid_hash)?;

    Ok(HashSettings {
        algorithm,
        version,
        params,
    })
}

fn invalid_hash(e: impl std::fmt::Display) -> AuthError {
    AuthError::Configuration(format!("invalid hash: {e}"))
}
