//! Login flow: form, credential forwarding, cookie issuance

use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use campus_client::LoginOutcome;
use serde::Deserialize;

use crate::error::{GatewayError, GatewayResult};
use crate::session::SessionToken;
use crate::state::AppState;
use crate::verifier::AccessDecision;
use crate::views;

#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// GET /login
///
/// Shows the form, or goes straight to `/` when the session is still good.
pub async fn login_form(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
) -> Response {
    if let Some(token) = token {
        if let AccessDecision::Granted(_) = state.verifier.verify(&token).await {
            return Redirect::to("/").into_response();
        }
    }

    views::login_page(None).into_response()
}

/// POST /login
pub async fn login_submit(
    State(state): State<AppState>,
    form: Result<Form<LoginForm>, FormRejection>,
) -> GatewayResult<Response> {
    let form = form.map(|Form(form)| form).unwrap_or_default();

    if form.username.is_empty() || form.password.is_empty() {
        metrics::counter!("gateway_login_total", "outcome" => "bad_request").increment(1);
        return Err(GatewayError::MissingCredentials);
    }

    match state.client.login(&form.username, &form.password).await {
        LoginOutcome::Authenticated { token } => {
            metrics::counter!("gateway_login_total", "outcome" => "success").increment(1);
            tracing::info!(username = %form.username, "Login succeeded, session cookie set");

            let session = &state.config.session;
            let max_age = state
                .verifier
                .session_max_age(&token, session.max_age_secs);
            let cookie = session.set_cookie(&token, max_age);
            Ok(([(header::SET_COOKIE, cookie)], Redirect::to("/")).into_response())
        }
        LoginOutcome::Rejected { message } => {
            metrics::counter!("gateway_login_total", "outcome" => "rejected").increment(1);
            tracing::info!(username = %form.username, "Login rejected by auth service");
            Err(GatewayError::LoginRejected(message))
        }
        LoginOutcome::Unreachable(cause) => {
            metrics::counter!("gateway_login_total", "outcome" => "unavailable").increment(1);
            Err(GatewayError::AuthUnavailable(cause))
        }
    }
}
