use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::HeaderMap;
use axum::response::AppendHeaders;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;

use super::ApiError;
use super::SuccessResponse;
use crate::domain::auth::ports::SessionStore;
use crate::inbound::http::cookie::clear_session_cookie;
use crate::inbound::http::cookie::session_token_from_headers;
use crate::inbound::http::router::AppState;

/// Log the user out of the current session.
///
/// The server-side session is destroyed and the cookie cleared; a request
/// without a session cookie still gets a clean 200.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    if let Some(token) = session_token_from_headers(&headers) {
        state.session_store.destroy(&token).await.map_err(|e| {
            tracing::error!(error = %e, "failed to destroy session");
            ApiError::Internal
        })?;
    }

    let headers = AppendHeaders([(SET_COOKIE, clear_session_cookie())]);
    Ok((headers, Json(SuccessResponse::ok())).into_response())
}
