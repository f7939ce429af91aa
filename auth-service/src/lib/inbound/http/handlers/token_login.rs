use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Serialize;

use super::login::check_login;
use super::login::LoginRequest;
use super::ApiError;
use crate::inbound::http::router::AppState;

/// Response containing the generated access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenResponse {
    pub access_token: String,
}

/// Exchange email and password for a signed access token.
pub async fn token_login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AccessTokenResponse>, ApiError> {
    let user_id = check_login(&state, body).await?;

    let access_token = state.token_service.issue(&user_id).map_err(|e| {
        tracing::error!(error = %e, "failed to sign access token");
        ApiError::Internal
    })?;

    Ok(Json(AccessTokenResponse { access_token }))
}
