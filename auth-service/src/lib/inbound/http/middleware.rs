//! Auth middleware layer.
//!
//! Four strategies, one shape: every middleware extracts a wire credential,
//! verifies it against the backing service, and attaches the same typed
//! [`CurrentUser`] principal to the request. The composition is written once
//! in [`require_auth`]; strategies only implement [`CredentialVerifier`].

use async_trait::async_trait;
use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::domain::auth::models::UserId;
use crate::inbound::http::router::AppState;

pub mod api_key;
pub mod basic;
pub mod session;
pub mod token;

pub use api_key::ApiKeyAuth;
pub use basic::BasicAuth;
pub use session::SessionAuth;
pub use token::TokenAuth;

/// Verified principal attached to the request after successful
/// authentication. Downstream handlers read only this, never the wire
/// credential that produced it.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser {
    pub user_id: UserId,
}

/// Why a verification attempt did not produce a principal.
///
/// Strategies map these to their own status codes; the split between
/// `Invalid` and `Internal` is what keeps credential rejections out of the
/// error log and infrastructure failures out of the 401s.
#[derive(Debug)]
pub enum AuthFailure {
    /// The request carries no credential for this strategy.
    Missing,
    /// A credential is present but does not parse.
    Malformed,
    /// The credential parsed but verification rejected it.
    Invalid,
    /// Storage or another collaborator failed; never the caller's fault.
    Internal(anyhow::Error),
}

/// One credential strategy: how to pull its wire format off a request, how
/// to verify it, and how to answer failures.
#[async_trait]
pub trait CredentialVerifier: Send + Sync + 'static {
    /// Strategy name used in server-side logs.
    const STRATEGY: &'static str;

    type Credential: Send + 'static;

    /// Pull the strategy's wire credential out of the request.
    fn extract(request: &Request) -> Result<Self::Credential, AuthFailure>;

    /// Check the credential against the backing service.
    async fn verify(state: &AppState, credential: Self::Credential)
        -> Result<UserId, AuthFailure>;

    /// Map a failure to the strategy's response. The default answers every
    /// credential problem with a bare 401 and logs only internal failures.
    fn reject(failure: AuthFailure) -> Response {
        match failure {
            AuthFailure::Internal(error) => {
                tracing::error!(strategy = Self::STRATEGY, error = %error, "authentication failed");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
            _ => StatusCode::UNAUTHORIZED.into_response(),
        }
    }
}

/// Generic auth middleware: extract, verify, attach or reject.
///
/// Instantiate per strategy via
/// `middleware::from_fn_with_state(state, require_auth::<BasicAuth>)`.
pub async fn require_auth<V: CredentialVerifier>(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let credential = V::extract(&request).map_err(V::reject)?;
    let user_id = V::verify(&state, credential).await.map_err(V::reject)?;

    request.extensions_mut().insert(CurrentUser { user_id });
    Ok(next.run(request).await)
}
