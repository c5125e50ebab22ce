//! Application state

use std::sync::Arc;

use campus_client::AuthClient;

use crate::config::Config;
use crate::verifier::AccessVerifier;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Issuing authority client
    pub client: AuthClient,
    /// Session token verification
    pub verifier: Arc<AccessVerifier>,
    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Build state from configuration
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let client = AuthClient::new(config.client.clone())?;
        let verifier = AccessVerifier::from_mode(&config.verification, &client)?;
        Ok(Self {
            client,
            verifier: Arc::new(verifier),
            config: Arc::new(config),
        })
    }

    /// Get request timeout from config
    pub fn request_timeout(&self) -> std::time::Duration {
        self.config.request_timeout
    }
}
