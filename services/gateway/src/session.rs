//! Session cookie handling
//!
//! The cookie only carries the token; the gateway sets it, clears it and
//! reads it back, nothing more.

use std::convert::Infallible;

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::http::{header, HeaderMap};

use crate::config::SessionConfig;
use crate::state::AppState;

impl SessionConfig {
    /// `Set-Cookie` value carrying a freshly issued token
    pub fn set_cookie(&self, token: &str, max_age_secs: u64) -> String {
        self.cookie(token, max_age_secs)
    }

    /// `Set-Cookie` value that makes the browser drop the session
    pub fn clear_cookie(&self) -> String {
        self.cookie("", 0)
    }

    fn cookie(&self, value: &str, max_age_secs: u64) -> String {
        let mut cookie = format!(
            "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
            self.cookie_name, value, max_age_secs
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie
    }

    /// Token from the request's `Cookie` headers, if present and non-empty
    pub fn token_from_headers(&self, headers: &HeaderMap) -> Option<String> {
        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == self.cookie_name)
            .map(|(_, value)| value.trim_matches('"').to_string())
            .filter(|value| !value.is_empty())
    }
}

/// Session token presented by the browser, if any
#[derive(Debug, Clone, Default)]
pub struct SessionToken(pub Option<String>);

impl<S> FromRequestParts<S> for SessionToken
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);
        Ok(Self(state.config.session.token_from_headers(&parts.headers)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(values: &[&str]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for value in values {
            headers.append(header::COOKIE, HeaderValue::from_str(value).unwrap());
        }
        headers
    }

    #[test]
    fn test_set_cookie_attributes() {
        let session = SessionConfig::default();
        assert_eq!(
            session.set_cookie("abc.def.ghi", 3600),
            "session=abc.def.ghi; HttpOnly; SameSite=Lax; Path=/; Max-Age=3600"
        );
    }

    #[test]
    fn test_secure_flag() {
        let session = SessionConfig {
            secure: true,
            ..SessionConfig::default()
        };
        assert!(session.set_cookie("t", 60).ends_with("; Secure"));
        assert!(session.clear_cookie().ends_with("; Secure"));
    }

    #[test]
    fn test_clear_cookie_expires_immediately() {
        let cookie = SessionConfig::default().clear_cookie();
        assert!(cookie.starts_with("session=;"));
        assert!(cookie.contains("Max-Age=0"));
        assert!(cookie.contains("Path=/"));
    }

    #[test]
    fn test_token_from_headers() {
        let session = SessionConfig::default();

        assert_eq!(
            session
                .token_from_headers(&headers(&["theme=dark; session=abc.def.ghi; lang=en"]))
                .as_deref(),
            Some("abc.def.ghi")
        );
        assert_eq!(
            session
                .token_from_headers(&headers(&["theme=dark", "session=tok"]))
                .as_deref(),
            Some("tok")
        );
    }

    #[test]
    fn test_missing_or_empty_cookie() {
        let session = SessionConfig::default();

        assert!(session.token_from_headers(&HeaderMap::new()).is_none());
        assert!(session.token_from_headers(&headers(&["session="])).is_none());
        assert!(session.token_from_headers(&headers(&["sessionid=abc"])).is_none());
        assert!(session.token_from_headers(&headers(&["jwt=abc"])).is_none());
    }
}
