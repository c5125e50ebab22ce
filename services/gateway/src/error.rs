//! Error pages for the gateway.
//!
//! Every failure is shown to the browser as the login view with a banner;
//! only the status code and the message differ.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use campus_client::ClientError;

use crate::views;

/// Gateway error type
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("username or password missing")]
    MissingCredentials,

    #[error("credentials rejected: {0}")]
    LoginRejected(String),

    #[error("issuing authority unavailable: {0}")]
    AuthUnavailable(#[from] ClientError),
}

impl GatewayError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingCredentials => StatusCode::BAD_REQUEST,
            Self::LoginRejected(_) => StatusCode::UNAUTHORIZED,
            Self::AuthUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn public_message(&self) -> &'static str {
        match self {
            Self::MissingCredentials => views::MISSING_CREDENTIALS,
            Self::LoginRejected(_) => views::LOGIN_REJECTED,
            Self::AuthUnavailable(_) => views::AUTH_UNAVAILABLE,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        if let Self::AuthUnavailable(cause) = &self {
            tracing::warn!(error = %cause, kind = cause.kind(), "Error connecting to auth service");
        }

        (
            self.status_code(),
            views::login_page(Some(self.public_message())),
        )
            .into_response()
    }
}

/// Result type for gateway handlers
pub type GatewayResult<T> = Result<T, GatewayError>;
