#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use tower::ServiceExt;

use gateway::{build_router, AppState, Config};

pub const SECRET: &str = "gateway-test-secret-0123456789abcdef";

/// Gateway router pointed at `auth_url`, with short upstream timeouts
pub fn gateway(auth_url: &str, verification: &str) -> Router {
    let auth_url = auth_url.to_string();
    let verification = verification.to_string();
    let config = Config::from_lookup(move |key| match key {
        "AUTH_SERVICE_URL" => Some(auth_url.clone()),
        "AUTH_CONNECT_TIMEOUT_MS" | "AUTH_REQUEST_TIMEOUT_MS" => Some("500".to_string()),
        "TOKEN_TTL_SECS" => Some("600".to_string()),
        "TOKEN_VERIFICATION" => Some(verification.clone()),
        "JWT_SECRET" => Some(SECRET.to_string()),
        _ => None,
    })
    .expect("test config");

    build_router(AppState::new(config).expect("test state"), None)
}

pub fn login_request(form: &str) -> Request<Body> {
    Request::post("/login")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap()
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::get(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub struct Page {
    pub status: StatusCode,
    pub location: Option<String>,
    pub set_cookie: Option<String>,
    pub body: String,
}

impl Page {
    /// `name=value` pair of the cookie that was set, ready to send back
    pub fn cookie_pair(&self) -> Option<String> {
        self.set_cookie
            .as_deref()
            .and_then(|cookie| cookie.split(';').next())
            .map(str::to_string)
    }
}

pub async fn send(app: Router, request: Request<Body>) -> Page {
    let response: Response<Body> = app.oneshot(request).await.unwrap();
    let header_value = |name: header::HeaderName| {
        response
            .headers()
            .get(name)
            .map(|value| value.to_str().unwrap().to_string())
    };

    let status = response.status();
    let location = header_value(header::LOCATION);
    let set_cookie = header_value(header::SET_COOKIE);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    Page {
        status,
        location,
        set_cookie,
        body: String::from_utf8_lossy(&bytes).into_owned(),
    }
}
