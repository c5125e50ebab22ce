//! Common test utilities for campus-auth-core integration tests

#![allow(dead_code)]

use campus_auth_core::{AuthConfig, CredentialRecord, SecretHasher};
use campus_types::Role;

pub const TEST_SECRET: &str = "integration-test-secret-0123456789abcdef";

/// Low-cost Argon2 parameters so tests do not spend seconds hashing
pub fn fast_hasher() -> SecretHasher {
    SecretHasher::with_params(1024, 1, 1).expect("valid argon2 params")
}

pub fn test_config() -> AuthConfig {
    AuthConfig::try_new(TEST_SECRET).expect("test secret is long enough")
}

/// Directory record with the secret hashed by `hasher`
pub fn record(
    hasher: &SecretHasher,
    id: i64,
    username: &str,
    secret: &str,
    role: Role,
) -> CredentialRecord {
    CredentialRecord {
        id,
        username: username.to_string(),
        password_hash: hasher.hash(secret).expect("hashing succeeds"),
        role,
    }
}
