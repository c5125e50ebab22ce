//! Auth client
//!
//! One timeout-bounded round trip per call, no retries. Each call resolves
//! to a finite set of outcomes so callers can branch instead of catching.

use std::time::Instant;

use campus_types::{Claims, LoginRequest, LoginResponse, ValidateRequest, ValidateResponse};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::{ClientConfig, ClientError};

/// Result of forwarding credentials to the issuing authority
#[derive(Debug)]
pub enum LoginOutcome {
    /// Credentials accepted; the signed token to hand to the browser
    Authenticated { token: String },
    /// The authority answered and refused the credentials
    Rejected { message: String },
    /// The authority could not be reached or gave an unusable answer
    Unreachable(ClientError),
}

/// Result of asking the issuing authority to validate a token
#[derive(Debug)]
pub enum ValidateOutcome {
    Valid(Claims),
    Invalid { message: String },
    Unreachable(ClientError),
}

/// HTTP client for the issuing authority
#[derive(Clone)]
pub struct AuthClient {
    config: ClientConfig,
    http: reqwest::Client,
}

impl AuthClient {
    /// Create a new auth client.
    ///
    /// The underlying HTTP client enforces both the connect timeout and the
    /// whole-request timeout, so no call can hang past `request_timeout`.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .pool_idle_timeout(std::time::Duration::from_secs(90))
            .tcp_nodelay(true)
            .build()
            .map_err(|e| ClientError::Connection(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { config, http })
    }

    /// `POST /login`
    pub async fn login(&self, username: &str, password: &str) -> LoginOutcome {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        let response = match self.post("/login", &body).await {
            Ok(response) => response,
            Err(err) => return LoginOutcome::Unreachable(err),
        };

        match response.status() {
            StatusCode::OK => match self.read_json::<LoginResponse>(response).await {
                Ok(LoginResponse {
                    success: true,
                    token: Some(token),
                    ..
                }) if !token.is_empty() => LoginOutcome::Authenticated { token },
                Ok(body) => LoginOutcome::Rejected {
                    message: body
                        .message
                        .unwrap_or_else(|| "Invalid credentials".to_string()),
                },
                Err(err) => LoginOutcome::Unreachable(err),
            },
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED => {
                let message = self
                    .read_json::<LoginResponse>(response)
                    .await
                    .ok()
                    .and_then(|body| body.message)
                    .unwrap_or_else(|| "Invalid credentials".to_string());
                LoginOutcome::Rejected { message }
            }
            status => LoginOutcome::Unreachable(ClientError::UnexpectedStatus {
                status: status.as_u16(),
            }),
        }
    }

    /// `POST /validate`
    pub async fn validate(&self, token: &str) -> ValidateOutcome {
        let body = ValidateRequest {
            token: Some(token.to_string()),
        };

        let response = match self.post("/validate", &body).await {
            Ok(response) => response,
            Err(err) => return ValidateOutcome::Unreachable(err),
        };

        match response.status() {
            StatusCode::OK => match self.read_json::<ValidateResponse>(response).await {
                Ok(ValidateResponse {
                    is_valid: true,
                    claims: Some(claims),
                    ..
                }) => ValidateOutcome::Valid(claims),
                Ok(body) => ValidateOutcome::Invalid {
                    message: body
                        .message
                        .unwrap_or_else(|| "Invalid or expired token".to_string()),
                },
                Err(err) => ValidateOutcome::Unreachable(err),
            },
            StatusCode::UNAUTHORIZED => {
                let message = self
                    .read_json::<ValidateResponse>(response)
                    .await
                    .ok()
                    .and_then(|body| body.message)
                    .unwrap_or_else(|| "Invalid or expired token".to_string());
                ValidateOutcome::Invalid { message }
            }
            status => ValidateOutcome::Unreachable(ClientError::UnexpectedStatus {
                status: status.as_u16(),
            }),
        }
    }

    async fn post<B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response, ClientError> {
        let url = self.config.endpoint(path);
        let start = Instant::now();

        let result = self.http.post(&url).json(body).send().await;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(response) => {
                tracing::debug!(
                    url = %url,
                    status = response.status().as_u16(),
                    elapsed_ms,
                    "Auth service responded"
                );
                Ok(response)
            }
            Err(e) => {
                let err = ClientError::from_reqwest(e, self.config.request_timeout);
                tracing::debug!(url = %url, error = %err, elapsed_ms, "Auth service call failed");
                Err(err)
            }
        }
    }

    async fn read_json<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ClientError::from_reqwest(e, self.config.request_timeout))?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::Serialization(e.to_string()))
    }
}

impl std::fmt::Debug for AuthClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
