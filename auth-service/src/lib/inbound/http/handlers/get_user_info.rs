use axum::extract::State;
use axum::Extension;
use axum::Json;
use serde::Serialize;

use super::ApiError;
use crate::domain::user::errors::UserError;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

/// Response containing the first name and last name of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfoResponse {
    pub first_name: String,
    pub last_name: String,
}

/// Fetch the authenticated user's first and last name.
///
/// Strategy-agnostic: the same handler serves every `/user/*` route and
/// reads only the verified principal left by whichever middleware ran.
pub async fn get_user_info(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<UserInfoResponse>, ApiError> {
    let profile = state
        .user_service
        .get_profile(&user.user_id)
        .await
        .map_err(|e| match e {
            UserError::NotFound(_) => ApiError::NotFound("user not found".to_string()),
            UserError::Database(_) => {
                tracing::error!(error = %e, "failed to fetch user profile");
                ApiError::Internal
            }
        })?;

    Ok(Json(UserInfoResponse {
        first_name: profile.first_name,
        last_name: profile.last_name,
    }))
}
