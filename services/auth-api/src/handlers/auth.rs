//! Authentication handlers (login, validate)

use axum::body::Bytes;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use campus_types::{LoginRequest, LoginResponse, ValidateRequest, ValidateResponse};

use crate::error::{ApiError, ApiResult};
use crate::extractors::BearerToken;
use crate::state::AppState;

/// POST /login
///
/// Exchanges a username and password for a signed session token.
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let Ok(Json(request)) = body else {
        metrics::counter!("auth_login_total", "outcome" => "bad_request").increment(1);
        return Err(ApiError::MissingCredentials);
    };

    if request.username.is_empty() || request.password.is_empty() {
        metrics::counter!("auth_login_total", "outcome" => "bad_request").increment(1);
        return Err(ApiError::MissingCredentials);
    }

    match state.auth.login(&request.username, &request.password).await {
        Ok(issued) => {
            metrics::counter!("auth_login_total", "outcome" => "success").increment(1);
            Ok(Json(LoginResponse::success(issued.token)))
        }
        Err(err) => {
            let err = ApiError::from(err);
            let outcome = if matches!(err, ApiError::InvalidCredentials) {
                "rejected"
            } else {
                "error"
            };
            metrics::counter!("auth_login_total", "outcome" => outcome).increment(1);
            Err(err)
        }
    }
}

/// POST /validate
///
/// Accepts `{"token": "..."}` or an `Authorization: Bearer` header. A
/// non-empty body token takes precedence; a body that is not valid JSON is
/// ignored in favour of the header.
pub async fn validate(
    State(state): State<AppState>,
    BearerToken(header_token): BearerToken,
    body: Bytes,
) -> ApiResult<Json<ValidateResponse>> {
    let body_token = serde_json::from_slice::<ValidateRequest>(&body)
        .ok()
        .and_then(|request| request.token)
        .filter(|token| !token.is_empty());

    let token = body_token.or(header_token).unwrap_or_default();

    match state.auth.validate(&token) {
        Ok(claims) => {
            metrics::counter!("auth_validate_total", "outcome" => "valid").increment(1);
            Ok(Json(ValidateResponse::valid(claims)))
        }
        Err(rejection) => {
            metrics::counter!("auth_validate_total", "outcome" => rejection.error_code())
                .increment(1);
            Err(rejection.into())
        }
    }
}
