//! Configuration for the gateway service.

use std::time::Duration;

use campus_auth_core::AuthConfig;
use campus_client::ClientConfig;

/// How the gateway decides whether a session token is still good
#[derive(Debug, Clone)]
pub enum VerificationMode {
    /// Verify signature and expiry locally with the shared secret
    Local(AuthConfig),
    /// Ask the issuing authority on every protected request
    Remote,
}

impl VerificationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local(_) => "local",
            Self::Remote => "remote",
        }
    }
}

/// Session cookie settings
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub secure: bool,
    /// Cookie lifetime when it cannot be read from the token itself
    pub max_age_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "session".to_string(),
            secure: false,
            max_age_secs: 3600,
        }
    }
}

/// Gateway configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub http_port: u16,

    /// Issuing authority client settings
    pub client: ClientConfig,

    /// Session cookie settings
    pub session: SessionConfig,

    /// Token verification strategy
    pub verification: VerificationMode,

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
        let http_port = parse_or(&lookup, "GATEWAY_HTTP_PORT", 3000)?;

        // Issuing authority
        let auth_url =
            lookup("AUTH_SERVICE_URL").unwrap_or_else(|| "http://localhost:3001".to_string());
        let connect_timeout_ms: u64 = parse_or(&lookup, "AUTH_CONNECT_TIMEOUT_MS", 2000)?;
        let request_timeout_ms: u64 = parse_or(&lookup, "AUTH_REQUEST_TIMEOUT_MS", 5000)?;
        let client = ClientConfig::new(auth_url)
            .with_connect_timeout(Duration::from_millis(connect_timeout_ms))
            .with_request_timeout(Duration::from_millis(request_timeout_ms));
        client
            .validate()
            .map_err(|e| ConfigError::Client(e.to_string()))?;

        // Session cookie
        let token_ttl_secs: u64 = parse_or(&lookup, "TOKEN_TTL_SECS", 3600)?;
        if token_ttl_secs == 0 {
            return Err(ConfigError::Invalid("TOKEN_TTL_SECS"));
        }
        let cookie_name = lookup("SESSION_COOKIE_NAME").unwrap_or_else(|| "session".to_string());
        if !is_valid_cookie_name(&cookie_name) {
            return Err(ConfigError::Invalid("SESSION_COOKIE_NAME"));
        }
        let session = SessionConfig {
            cookie_name,
            secure: parse_or(&lookup, "SESSION_COOKIE_SECURE", false)?,
            max_age_secs: token_ttl_secs,
        };

        // Local verification needs the shared secret; remote does not
        let verification = match lookup("TOKEN_VERIFICATION").as_deref() {
            None | Some("local") => {
                let secret = lookup("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;
                let auth = AuthConfig::try_new(secret)
                    .map_err(|e| ConfigError::AuthConfig(e.to_string()))?
                    .with_token_ttl(Duration::from_secs(token_ttl_secs));
                VerificationMode::Local(auth)
            }
            Some("remote") => VerificationMode::Remote,
            Some(_) => return Err(ConfigError::Invalid("TOKEN_VERIFICATION")),
        };

        // Must outlast the upstream call so a stalled issuer still gets the
        // service-unavailable page
        let request_timeout_secs: u64 = parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 30)?;
        let request_timeout = Duration::from_secs(request_timeout_secs);
        if request_timeout <= client.request_timeout {
            return Err(ConfigError::Invalid("REQUEST_TIMEOUT_SECS"));
        }

        let metrics_enabled = lookup("METRICS_ENABLED")
            .unwrap_or_else(|| "true".to_string())
            .parse()
            .unwrap_or(true);

        Ok(Self {
            http_port,
            client,
            session,
            verification,
            request_timeout,
            metrics_enabled,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid(key)),
        None => Ok(default),
    }
}

fn is_valid_cookie_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b))
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

    #[error("Auth client config error: {0}")]
    Client(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    const SECRET: &str = "gateway-config-secret-0123456789abcdef";

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[("JWT_SECRET", SECRET)])).unwrap();

        assert_eq!(config.http_port, 3000);
        assert_eq!(config.client.auth_url, "http://localhost:3001");
        assert_eq!(config.client.connect_timeout, Duration::from_millis(2000));
        assert_eq!(config.client.request_timeout, Duration::from_millis(5000));
        assert_eq!(config.session.cookie_name, "session");
        assert!(!config.session.secure);
        assert_eq!(config.session.max_age_secs, 3600);
        assert_eq!(config.verification.as_str(), "local");
    }

    #[test]
    fn test_local_verification_requires_secret() {
        let result = Config::from_lookup(lookup(&[]));
        assert!(matches!(result, Err(ConfigError::Missing("JWT_SECRET"))));
    }

    #[test]
    fn test_remote_verification_needs_no_secret() {
        let config = Config::from_lookup(lookup(&[("TOKEN_VERIFICATION", "remote")])).unwrap();
        assert!(matches!(config.verification, VerificationMode::Remote));
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            Config::from_lookup(lookup(&[("JWT_SECRET", SECRET), ("TOKEN_VERIFICATION", "both")])),
            Err(ConfigError::Invalid("TOKEN_VERIFICATION"))
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[("JWT_SECRET", SECRET), ("SESSION_COOKIE_NAME", "a b")])),
            Err(ConfigError::Invalid("SESSION_COOKIE_NAME"))
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[("JWT_SECRET", SECRET), ("SESSION_COOKIE_SECURE", "yes")])),
            Err(ConfigError::Invalid("SESSION_COOKIE_SECURE"))
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[("JWT_SECRET", SECRET), ("AUTH_SERVICE_URL", "auth:3001")])),
            Err(ConfigError::Client(_))
        ));
    }

    #[test]
    fn test_request_timeout_must_outlast_upstream_call() {
        for vars in [
            [("REQUEST_TIMEOUT_SECS", "0"), ("AUTH_REQUEST_TIMEOUT_MS", "5000")],
            [("REQUEST_TIMEOUT_SECS", "5"), ("AUTH_REQUEST_TIMEOUT_MS", "5000")],
            [("REQUEST_TIMEOUT_SECS", "2"), ("AUTH_REQUEST_TIMEOUT_MS", "5000")],
        ] {
            let mut all = vec![("JWT_SECRET", SECRET)];
            all.extend(vars.iter().copied());
            assert!(
                matches!(
                    Config::from_lookup(lookup(&all)),
                    Err(ConfigError::Invalid("REQUEST_TIMEOUT_SECS"))
                ),
                "{vars:?}"
            );
        }

        let config = Config::from_lookup(lookup(&[
            ("JWT_SECRET", SECRET),
            ("REQUEST_TIMEOUT_SECS", "6"),
            ("AUTH_REQUEST_TIMEOUT_MS", "5000"),
        ]))
        .unwrap();
        assert_eq!(config.request_timeout, Duration::from_secs(6));
    }
}
