use async_trait::async_trait;
use axum::extract::Request;
use axum::http::header::AUTHORIZATION;
use axum::http::header::WWW_AUTHENTICATE;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use super::AuthFailure;
use super::CredentialVerifier;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::UserId;
use crate::inbound::http::router::AppState;

const CHALLENGE: &str = r#"Basic realm="user""#;

/// Email and password recovered from a `Basic` authorization header.
#[derive(Debug, PartialEq, Eq)]
pub struct BasicCredentials {
    pub email: String,
    pub password: String,
}

/// `Authorization: Basic <base64(email:password)>`.
///
/// Every failure mode short of an infrastructure error answers the same
/// 401 plus challenge, so a caller cannot tell a missing header from a bad
/// base64 payload from a wrong password.
pub struct BasicAuth;

#[async_trait]
impl CredentialVerifier for BasicAuth {
    const STRATEGY: &'static str = "basic";

    type Credential = BasicCredentials;

    fn extract(request: &Request) -> Result<Self::Credential, AuthFailure> {
        let header = request
            .headers()
            .get(AUTHORIZATION)
            .ok_or(AuthFailure::Missing)?;
        let header = header.to_str().map_err(|_| AuthFailure::Malformed)?;

        parse_basic_auth(header).ok_or(AuthFailure::Malformed)
    }

    async fn verify(
        state: &AppState,
        credential: Self::Credential,
    ) -> Result<UserId, AuthFailure> {
        state
            .auth_service
            .check_password(&credential.email, &credential.password)
            .await
            .map_err(|e| match e {
                AuthError::InvalidCredentials => AuthFailure::Invalid,
                e => AuthFailure::Internal(e.into()),
            })
    }

    fn reject(failure: AuthFailure) -> Response {
        match failure {
            AuthFailure::Internal(error) => {
                tracing::error!(strategy = Self::STRATEGY, error = %error, "basic auth failed");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
            _ => (
                StatusCode::UNAUTHORIZED,
                [(WWW_AUTHENTICATE, CHALLENGE)],
            )
                .into_response(),
        }
    }
}

fn parse_basic_auth(header: &str) -> Option<BasicCredentials> {
    let encoded = header.strip_prefix("Basic ")?;
    let decoded = BASE64.decode(encoded).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;

    let (email, password) = decoded.split_once(':')?;
    Some(BasicCredentials {
        email: email.to_string(),
        password: password.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_auth() {
        let header = format!("Basic {}", BASE64.encode("johndoe@example.com:pass_word!"));
        let credentials = parse_basic_auth(&header).unwrap();
        assert_eq!(credentials.email, "johndoe@example.com");
        assert_eq!(credentials.password, "pass_word!");
    }

    #[test]
    fn test_parse_keeps_colons_in_password() {
        let header = format!("Basic {}", BASE64.encode("a@b.com:pa:ss"));
        let credentials = parse_basic_auth(&header).unwrap();
        assert_eq!(credentials.password, "pa:ss");
    }

    #[test]
    fn test_parse_rejects_wrong_scheme() {
        assert!(parse_basic_auth("Bearer abc").is_none());
    }

    #[test]
    fn test_parse_rejects_bad_base64() {
        assert!(parse_basic_auth("Basic not-base64!!!").is_none());
    }

    #[test]
    fn test_parse_rejects_payload_without_colon() {
        let header = format!("Basic {}", BASE64.encode("no-colon-here"));
        assert!(parse_basic_auth(&header).is_none());
    }
}
