//! Axum extractors

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{header, HeaderMap};

/// Token carried in an `Authorization: Bearer <token>` header, if any.
///
/// A malformed or non-Bearer header counts as absent; the handler decides
/// whether a missing token is an error.
#[derive(Debug, Clone, Default)]
pub struct BearerToken(pub Option<String>);

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(bearer_from_headers(&parts.headers)))
    }
}

fn bearer_from_headers(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then(|| token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_extracted() {
        assert_eq!(
            bearer_from_headers(&headers("Bearer abc.def.ghi")).as_deref(),
            Some("abc.def.ghi")
        );
        assert_eq!(
            bearer_from_headers(&headers("bearer abc")).as_deref(),
            Some("abc")
        );
    }

    #[test]
    fn test_non_bearer_header_is_absent() {
        assert!(bearer_from_headers(&HeaderMap::new()).is_none());
        assert!(bearer_from_headers(&headers("Basic dXNlcjpwYXNz")).is_none());
        assert!(bearer_from_headers(&headers("Bearer ")).is_none());
        assert!(bearer_from_headers(&headers("Bearer")).is_none());
    }
}
