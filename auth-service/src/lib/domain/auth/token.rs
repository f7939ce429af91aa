use chrono::Duration;
use chrono::Utc;

use auth::Claims;
use auth::JwtHandler;

use crate::domain::auth::errors::TokenError;
use crate::domain::auth::models::UserId;

/// Access token lifetime. There is no refresh mechanism; an expired token
/// means logging in again.
const TOKEN_TTL_HOURS: i64 = 1;

/// Issues and validates stateless bearer tokens.
///
/// Tokens carry the user id as subject and are signed HS256 with the single
/// server-held secret; validity is purely temporal.
pub struct TokenService {
    handler: JwtHandler,
}

impl TokenService {
    pub fn new(hmac_secret: &[u8]) -> Self {
        Self {
            handler: JwtHandler::new(hmac_secret),
        }
    }

    /// Issue a signed access token for a user.
    ///
    /// # Errors
    /// * `Signing` - the token could not be signed
    pub fn issue(&self, user_id: &UserId) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims::new()
            .with_subject(user_id)
            .with_issued_at(now.timestamp())
            .with_expiration((now + Duration::hours(TOKEN_TTL_HOURS)).timestamp());

        self.handler
            .encode(&claims)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Validate a presented token and extract the subject user id.
    ///
    /// Signature, algorithm, and expiry failures are `InvalidToken`. A token
    /// that passes all of those but carries no usable subject is
    /// `InvalidClaims`: only our own issuer signs with this secret, so a
    /// malformed subject points at an issuance bug rather than a bad client.
    pub fn validate(&self, token: &str) -> Result<UserId, TokenError> {
        let claims: Claims = self
            .handler
            .decode(token)
            .map_err(|e| TokenError::InvalidToken(e.to_string()))?;

        let subject = claims
            .sub
            .ok_or_else(|| TokenError::InvalidClaims("missing subject".to_string()))?;
        UserId::from_string(&subject)
            .map_err(|e| TokenError::InvalidClaims(format!("subject is not a valid UUID: {e}")))
    }
}
