use async_trait::async_trait;
use axum::extract::Request;
use axum::http::header::AUTHORIZATION;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;

use super::AuthFailure;
use super::CredentialVerifier;
use crate::domain::auth::errors::TokenError;
use crate::domain::auth::models::UserId;
use crate::inbound::http::handlers::ErrorResponse;
use crate::inbound::http::router::AppState;

/// `Authorization: Bearer <token>`.
pub struct TokenAuth;

#[async_trait]
impl CredentialVerifier for TokenAuth {
    const STRATEGY: &'static str = "token";

    type Credential = String;

    fn extract(request: &Request) -> Result<Self::Credential, AuthFailure> {
        let header = request
            .headers()
            .get(AUTHORIZATION)
            .ok_or(AuthFailure::Missing)?;
        let header = header.to_str().map_err(|_| AuthFailure::Malformed)?;

        header
            .strip_prefix("Bearer ")
            .map(str::to_string)
            .ok_or(AuthFailure::Malformed)
    }

    async fn verify(state: &AppState, token: Self::Credential) -> Result<UserId, AuthFailure> {
        state.token_service.validate(&token).map_err(|e| match e {
            TokenError::InvalidToken(_) => AuthFailure::Invalid,
            // A well-signed token with unusable claims is our bug, not the
            // caller's.
            e @ (TokenError::InvalidClaims(_) | TokenError::Signing(_)) => {
                AuthFailure::Internal(e.into())
            }
        })
    }

    fn reject(failure: AuthFailure) -> Response {
        match failure {
            AuthFailure::Missing => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::new("Missing Authorization header")),
            )
                .into_response(),
            AuthFailure::Malformed | AuthFailure::Invalid => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::new("Invalid token")),
            )
                .into_response(),
            AuthFailure::Internal(error) => {
                tracing::error!(strategy = Self::STRATEGY, error = %error, "valid signature but unusable claims");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
