//! Credential store
//!
//! The user directory is injected behind [`CredentialStore`] so the issuing
//! authority does not care where identities live. The bundled
//! [`InMemoryCredentialStore`] is a read-only map built once at startup.

use async_trait::async_trait;
use campus_types::{Role, User, UserId};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::crypto::{hash_settings, verify_secret, HashSettings, SecretHasher};
use crate::AuthError;

/// Credential-match queries against a user directory
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Find the user whose username and secret both match.
    ///
    /// Returns `Ok(None)` for an unknown username, a wrong secret, or empty
    /// input. Never reveals which of the two did not match.
    async fn find_user(&self, username: &str, secret: &str) -> Result<Option<User>, AuthError>;
}

/// One directory entry as loaded from configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialRecord {
    pub id: i64,
    pub username: String,
    /// Argon2 PHC string
    pub password_hash: String,
    pub role: Role,
}

#[derive(Debug)]
struct StoredUser {
    user: User,
    password_hash: String,
}

#[derive(Debug)]
struct Directory {
    users: HashMap<String, StoredUser>,
    /// Verified against when the username is unknown, so lookups for
    /// unknown and known users take the same time
    dummy_hash: String,
}

/// Read-only in-memory user directory.
///
/// Cheap to clone; safe for unlimited concurrent lookups without locking.
#[derive(Debug, Clone)]
pub struct InMemoryCredentialStore {
    directory: Arc<Directory>,
}

impl InMemoryCredentialStore {
    /// Build a store from directory records.
    ///
    /// All records must share one set of Argon2 settings; the dummy hash for
    /// unknown usernames is made with those same settings. `hasher` is only
    /// used for the dummy hash of an empty directory.
    ///
    /// # Errors
    /// `AuthError::Configuration` on an empty or duplicate username, a hash
    /// that is not an Argon2 PHC string, or records with mixed settings.
    pub fn from_records(
        records: impl IntoIterator<Item = CredentialRecord>,
        hasher: &SecretHasher,
    ) -> Result<Self, AuthError> {
        let mut users = HashMap::new();
        let mut settings: Option<HashSettings> = None;

        for record in records {
            if record.username.is_empty() {
                return Err(AuthError::Configuration(format!(
                    "user {} has an empty username",
                    record.id
                )));
            }
            let record_settings = hash_settings(&record.password_hash).map_err(|_| {
                AuthError::Configuration(format!(
                    "user '{}' has an invalid password hash",
                    record.username
                ))
            })?;
            match &settings {
                None => settings = Some(record_settings),
                Some(expected) if *expected != record_settings => {
                    return Err(AuthError::Configuration(format!(
                        "user '{}' has different argon2 settings from the rest of the directory",
                        record.username
                    )));
                }
                Some(_) => {}
            }
            if users.contains_key(&record.username) {
                return Err(AuthError::Configuration(format!(
                    "duplicate username '{}'",
                    record.username
                )));
            }

            let stored = StoredUser {
                user: User::new(UserId(record.id), record.username.clone(), record.role),
                password_hash: record.password_hash,
            };
            users.insert(record.username, stored);
        }

        let dummy_hash = match settings {
            Some(settings) => SecretHasher::from(settings).hash("directory-placeholder-secret")?,
            None => hasher.hash("directory-placeholder-secret")?,
        };

        Ok(Self {
            directory: Arc::new(Directory { users, dummy_hash }),
        })
    }

    /// Load directory records from a JSON array file
    pub fn from_json_file(path: impl AsRef<Path>, hasher: &SecretHasher) -> Result<Self, AuthError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AuthError::Configuration(format!("cannot read {}: {e}", path.display()))
        })?;
        let records: Vec<CredentialRecord> = serde_json::from_str(&raw).map_err(|e| {
            AuthError::Configuration(format!("cannot parse {}: {e}", path.display()))
        })?;

        let store = Self::from_records(records, hasher)?;
        tracing::info!(
            users = store.len(),
            path = %path.display(),
            "Loaded user directory"
        );
        Ok(store)
    }

    /// The two built-in demo accounts, `student1` and `faculty1`, both with
    /// secret `password`, hashed with a fresh salt at startup
    pub fn demo(hasher: &SecretHasher) -> Result<Self, AuthError> {
        let seeds = [
            (101, "student1", Role::Student),
            (201, "faculty1", Role::Faculty),
        ];

        let mut records = Vec::with_capacity(seeds.len());
        for (id, username, role) in seeds {
            records.push(CredentialRecord {
                id,
                username: username.to_string(),
                password_hash: hasher.hash("password")?,
                role,
            });
        }

        Self::from_records(records, hasher)
    }

    /// Number of users in the directory
    pub fn len(&self) -> usize {
        self.directory.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directory.users.is_empty()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_user(&self, username: &str, secret: &str) -> Result<Option<User>, AuthError> {
        if username.is_empty() || secret.is_empty() {
            return Ok(None);
        }

        let (hash, candidate) = match self.directory.users.get(username) {
            Some(stored) => (stored.password_hash.clone(), Some(stored.user.clone())),
            None => (self.directory.dummy_hash.clone(), None),
        };

        // Argon2 is CPU-bound; keep it off the async workers
        let secret = secret.to_owned();
        let matched = tokio::task::spawn_blocking(move || verify_secret(&secret, &hash))
            .await
            .map_err(|e| {
                tracing::error!("Credential check task failed: {}", e);
                AuthError::Internal("credential check failed".to_string())
            })?;

        Ok(candidate.filter(|_| matched))
    }
}
