//! Error types for the Auth API service.
//!
//! Login and validation failures keep the response shapes callers branch
//! on (`{success, message}` and `{isValid, message}`); anything else falls
//! back to the structured `{error: {code, message}}` envelope.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use campus_auth_core::{AuthError, TokenRejection};
use campus_types::{LoginResponse, ValidateResponse};
use serde::Serialize;

/// Structured error envelope for unexpected failures
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

/// API error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Missing username or password")]
    MissingCredentials,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("{}", .0.public_message())]
    Token(TokenRejection),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingCredentials => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials | Self::Token(_) => StatusCode::UNAUTHORIZED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingCredentials => "BAD_REQUEST",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Token(rejection) => rejection.error_code(),
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => Self::InvalidCredentials,
            AuthError::Token(rejection) => Self::Token(rejection),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<TokenRejection> for ApiError {
    fn from(rejection: TokenRejection) -> Self {
        Self::Token(rejection)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match self {
            Self::MissingCredentials | Self::InvalidCredentials => {
                (status, Json(LoginResponse::failure(self.to_string()))).into_response()
            }
            Self::Token(rejection) => (
                status,
                Json(ValidateResponse::invalid(rejection.public_message())),
            )
                .into_response(),
            Self::Internal(ref detail) => {
                tracing::error!(error = %detail, "Internal API error");
                let body = ErrorResponse {
                    error: ErrorDetail {
                        code: self.error_code().to_string(),
                        message: "Internal server error".to_string(),
                    },
                };
                (status, Json(body)).into_response()
            }
        }
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
