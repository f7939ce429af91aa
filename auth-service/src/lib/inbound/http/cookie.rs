//! Session cookie plumbing.
//!
//! The cookie value is the opaque session token; everything about the
//! session itself lives server-side in the session store.

use axum::http::header::COOKIE;
use axum::http::HeaderMap;

use crate::domain::auth::models::SessionToken;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "session";

/// Build the `Set-Cookie` value establishing a session.
pub fn session_cookie(token: &SessionToken) -> String {
    format!(
        "{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax",
        token.as_str()
    )
}

/// Build the `Set-Cookie` value clearing the session cookie.
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Extract the session token from the request's `Cookie` headers, if any.
pub fn session_token_from_headers(headers: &HeaderMap) -> Option<SessionToken> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| SessionToken::from(value.to_string()))
}
