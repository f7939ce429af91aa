use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::SuccessResponse;
use super::EMAIL_TAKEN;
use super::JSON_PARSE_FAILED;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::EmailAddress;
use crate::domain::auth::models::RegisterUserCommand;
use crate::inbound::http::router::AppState;

/// HTTP request body for registration (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    email: String,
    password: String,
    first_name: String,
    last_name: String,
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterUserCommand, ApiError> {
        let email = EmailAddress::new(self.email)
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;
        Ok(RegisterUserCommand::new(
            email,
            self.password,
            self.first_name,
            self.last_name,
        ))
    }
}

pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let Json(body) = body.map_err(|_| ApiError::BadRequest(JSON_PARSE_FAILED.to_string()))?;
    let command = body.try_into_command()?;

    state
        .auth_service
        .register(command)
        .await
        .map_err(|e| match e {
            AuthError::DuplicateEmail => ApiError::Conflict(EMAIL_TAKEN.to_string()),
            e => {
                tracing::error!(error = %e, "failed to register user");
                ApiError::Internal
            }
        })?;

    Ok(Json(SuccessResponse::ok()))
}
