//! Minimal inline HTML views

use axum::response::Html;
use campus_types::Claims;

pub const LOGIN_REJECTED: &str = "Login failed: Invalid credentials.";
pub const MISSING_CREDENTIALS: &str = "Please enter both a username and a password.";
pub const AUTH_UNAVAILABLE: &str = "Authentication Service Unavailable. Please try again later.";

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head><meta charset=\"utf-8\"><title>{title}</title></head>\n\
         <body>\n{body}\n</body>\n\
         </html>\n"
    ))
}

/// Login form, optionally with an error banner
pub fn login_page(error: Option<&str>) -> Html<String> {
    let banner = error
        .map(|message| format!("<p class=\"error\" role=\"alert\">{}</p>\n", escape_html(message)))
        .unwrap_or_default();

    layout(
        "Sign in",
        &format!(
            "<h1>Campus Portal</h1>\n\
             {banner}\
             <form method=\"post\" action=\"/login\">\n\
             <label>Username <input name=\"username\" autocomplete=\"username\"></label>\n\
             <label>Password <input name=\"password\" type=\"password\" autocomplete=\"current-password\"></label>\n\
             <button type=\"submit\">Sign in</button>\n\
             </form>"
        ),
    )
}

/// Landing page for an authenticated user
pub fn landing_page(claims: &Claims) -> Html<String> {
    layout(
        "Courses",
        &format!(
            "<h1>Welcome, {username}!</h1>\n\
             <p>You are logged in as <strong>{role}</strong>.</p>\n\
             <p><a href=\"/logout\">Log out</a></p>",
            username = escape_html(&claims.username),
            role = claims.role,
        ),
    )
}

/// Escape HTML special characters
pub fn escape_html(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}
