use async_trait::async_trait;
use axum::extract::Request;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;

use super::AuthFailure;
use super::CredentialVerifier;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::ApiKey;
use crate::domain::auth::models::UserId;
use crate::inbound::http::router::AppState;

pub const API_KEY_HEADER: &str = "x-api-key";

/// `X-API-Key: publicId.secret`.
///
/// The only strategy that distinguishes a malformed credential (400) from a
/// rejected one (401): the key shape is a client formatting contract, and a
/// wrongly shaped key never reaches the store.
pub struct ApiKeyAuth;

#[async_trait]
impl CredentialVerifier for ApiKeyAuth {
    const STRATEGY: &'static str = "api-key";

    type Credential = ApiKey;

    fn extract(request: &Request) -> Result<Self::Credential, AuthFailure> {
        let header = request
            .headers()
            .get(API_KEY_HEADER)
            .ok_or(AuthFailure::Missing)?;
        let header = header.to_str().map_err(|_| AuthFailure::Malformed)?;

        header.parse().map_err(|_| AuthFailure::Malformed)
    }

    async fn verify(state: &AppState, key: Self::Credential) -> Result<UserId, AuthFailure> {
        state
            .auth_service
            .validate_api_key(&key)
            .await
            .map_err(|e| match e {
                AuthError::ApiKeyInvalid => AuthFailure::Invalid,
                e => AuthFailure::Internal(e.into()),
            })
    }

    fn reject(failure: AuthFailure) -> Response {
        match failure {
            AuthFailure::Missing | AuthFailure::Invalid => {
                StatusCode::UNAUTHORIZED.into_response()
            }
            AuthFailure::Malformed => StatusCode::BAD_REQUEST.into_response(),
            AuthFailure::Internal(error) => {
                tracing::error!(strategy = Self::STRATEGY, error = %error, "api key validation failed");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
