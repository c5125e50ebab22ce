//! Logout

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Redirect};

use crate::state::AppState;

/// GET /logout - clear the session cookie and return to the login form
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    let cookie = state.config.session.clear_cookie();
    ([(header::SET_COOKIE, cookie)], Redirect::to("/login"))
}
