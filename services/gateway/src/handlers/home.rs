//! Protected landing page

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Redirect, Response};

use crate::error::GatewayError;
use crate::session::SessionToken;
use crate::state::AppState;
use crate::verifier::AccessDecision;
use crate::views;

/// GET /
///
/// Anonymous visitors go to the login form. A token that fails verification
/// is cleared before redirecting so the browser stops presenting it.
pub async fn home(State(state): State<AppState>, SessionToken(token): SessionToken) -> Response {
    let Some(token) = token else {
        metrics::counter!("gateway_access_total", "outcome" => "anonymous").increment(1);
        return Redirect::to("/login").into_response();
    };

    match state.verifier.verify(&token).await {
        AccessDecision::Granted(claims) => {
            metrics::counter!("gateway_access_total", "outcome" => "granted").increment(1);
            tracing::debug!(user_id = %claims.id, role = %claims.role, "Access granted");
            views::landing_page(&claims).into_response()
        }
        AccessDecision::Denied { reason } => {
            metrics::counter!("gateway_access_total", "outcome" => "denied").increment(1);
            tracing::info!(
                reason = %reason,
                mode = state.verifier.mode(),
                "Session token rejected, clearing cookie"
            );
            let cookie = state.config.session.clear_cookie();
            ([(header::SET_COOKIE, cookie)], Redirect::to("/login")).into_response()
        }
        AccessDecision::Unavailable(cause) => {
            metrics::counter!("gateway_access_total", "outcome" => "unavailable").increment(1);
            GatewayError::AuthUnavailable(cause).into_response()
        }
    }
}
