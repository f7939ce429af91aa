use axum::extract::State;
use axum::Extension;
use axum::Json;
use serde::Serialize;

use super::ApiError;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

/// Response containing a freshly generated API key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyResponse {
    /// `publicId.secret`; the secret is returned exactly once and cannot be
    /// retrieved later.
    pub api_key: String,
}

/// Generate an API key for the authenticated user.
pub async fn generate_api_key(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<ApiKeyResponse>, ApiError> {
    let key = state
        .auth_service
        .generate_api_key(&user.user_id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "failed to generate api key");
            ApiError::Internal
        })?;

    Ok(Json(ApiKeyResponse {
        api_key: key.to_string(),
    }))
}
