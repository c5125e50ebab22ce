//! Application state

use std::sync::Arc;

use campus_auth_core::{AuthError, AuthService, InMemoryCredentialStore, SecretHasher};

use crate::config::Config;

/// Type alias for the auth service with the concrete directory type
pub type AuthServiceImpl = AuthService<InMemoryCredentialStore>;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Credential check and token issuance
    pub auth: Arc<AuthServiceImpl>,
    /// User directory (shared with `auth`, kept for readiness checks)
    pub directory: Arc<InMemoryCredentialStore>,
    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Create new application state
    pub fn new(directory: InMemoryCredentialStore, config: Config) -> Result<Self, AuthError> {
        let directory = Arc::new(directory);
        let auth = AuthService::new(&config.auth, Arc::clone(&directory))?;
        Ok(Self {
            auth: Arc::new(auth),
            directory,
            config: Arc::new(config),
        })
    }

    /// Load the configured user directory and build state from it
    pub fn initialize(config: Config, hasher: &SecretHasher) -> Result<Self, AuthError> {
        let directory = match &config.user_directory {
            Some(path) => InMemoryCredentialStore::from_json_file(path, hasher)?,
            None => {
                tracing::warn!("USER_DIRECTORY_FILE not set, using built-in demo users");
                InMemoryCredentialStore::demo(hasher)?
            }
        };
        Self::new(directory, config)
    }

    /// Get request timeout from config
    pub fn request_timeout(&self) -> std::time::Duration {
        self.config.request_timeout
    }
}
