//! Configuration for the Auth API service.

use campus_auth_core::AuthConfig;
use std::path::PathBuf;
use std::time::Duration;

/// Auth API configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub http_port: u16,

    /// Token signing configuration
    pub auth: AuthConfig,

    /// JSON user directory; demo users when unset
    pub user_directory: Option<PathBuf>,

    /// Request timeout
    pub request_timeout: Duration,

    /// Metrics enabled
    pub metrics_enabled: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        // Server port
        let http_port = lookup("AUTH_HTTP_PORT")
            .unwrap_or_else(|| "3001".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("AUTH_HTTP_PORT"))?;

        // Signing secret (minimum 32 bytes)
        let signing_secret = lookup("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;

        // Token lifetime (default 1 hour)
        let token_ttl_secs: u64 = lookup("TOKEN_TTL_SECS")
            .unwrap_or_else(|| "3600".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("TOKEN_TTL_SECS"))?;
        if token_ttl_secs == 0 {
            return Err(ConfigError::Invalid("TOKEN_TTL_SECS"));
        }

        // Request timeout (default 30 seconds)
        let request_timeout_secs: u64 = lookup("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|| "30".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("REQUEST_TIMEOUT_SECS"))?;
        if request_timeout_secs == 0 {
            return Err(ConfigError::Invalid("REQUEST_TIMEOUT_SECS"));
        }

        // Metrics
        let metrics_enabled = lookup("METRICS_ENABLED")
            .unwrap_or_else(|| "true".to_string())
            .parse()
            .unwrap_or(true);

        let user_directory = lookup("USER_DIRECTORY_FILE")
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);

        let auth = AuthConfig::try_new(signing_secret)
            .map_err(|e| ConfigError::AuthConfig(e.to_string()))?
            .with_token_ttl(Duration::from_secs(token_ttl_secs));

        Ok(Self {
            http_port,
            auth,
            user_directory,
            request_timeout: Duration::from_secs(request_timeout_secs),
            metrics_enabled,
        })
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),

    #[error("Auth config error: {0}")]
    AuthConfig(String),
}
