use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::response::AppendHeaders;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::SuccessResponse;
use super::JSON_PARSE_FAILED;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::SessionToken;
use crate::domain::auth::models::UserId;
use crate::domain::auth::ports::SessionStore;
use crate::domain::auth::ports::SESSION_USER_ID_KEY;
use crate::inbound::http::cookie::session_cookie;
use crate::inbound::http::router::AppState;

/// HTTP request body for both login variants.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Parse the login body and verify the password, sharing the failure
/// mapping between the session and token login handlers.
pub(super) async fn check_login(
    state: &AppState,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<UserId, ApiError> {
    let Json(body) = body.map_err(|_| ApiError::BadRequest(JSON_PARSE_FAILED.to_string()))?;

    state
        .auth_service
        .check_password(&body.email, &body.password)
        .await
        .map_err(|e| match e {
            AuthError::InvalidCredentials => {
                ApiError::Unauthorized("invalid credentials".to_string())
            }
            e => {
                tracing::error!(error = %e, "login failed");
                ApiError::Internal
            }
        })
}

pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let user_id = check_login(&state, body).await?;

    // A fresh token on every login; an attacker-supplied cookie value never
    // becomes an authenticated session.
    let token = SessionToken::generate().map_err(|e| {
        tracing::error!(error = %e, "failed to generate session token");
        ApiError::Internal
    })?;

    state
        .session_store
        .write(&token, SESSION_USER_ID_KEY, &user_id.to_string())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "failed to persist session");
            ApiError::Internal
        })?;

    let headers = AppendHeaders([(SET_COOKIE, session_cookie(&token))]);
    Ok((headers, Json(SuccessResponse::ok())).into_response())
}
