//! Request/response bodies of the issuing authority

use serde::{Deserialize, Serialize};

use crate::Claims;

/// `POST /login` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// `POST /login` response, both for success and failure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl LoginResponse {
    pub fn success(token: impl Into<String>) -> Self {
        Self {
            success: true,
            token: Some(token.into()),
            message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            token: None,
            message: Some(message.into()),
        }
    }
}

/// `POST /validate` body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidateRequest {
    #[serde(default)]
    pub token: Option<String>,
}

/// `POST /validate` response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateResponse {
    pub is_valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claims: Option<Claims>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ValidateResponse {
    pub fn valid(claims: Claims) -> Self {
        Self {
            is_valid: true,
            claims: Some(claims),
            message: None,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            claims: None,
            message: Some(message.into()),
        }
    }
}
