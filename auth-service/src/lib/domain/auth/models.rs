use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::auth::errors::ApiKeyFormatError;
use crate::domain::auth::errors::EmailError;
use crate::domain::auth::errors::UserIdError;

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    /// Get email as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to register a new user with a password credential.
#[derive(Debug)]
pub struct RegisterUserCommand {
    pub email: EmailAddress,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

impl RegisterUserCommand {
    pub fn new(
        email: EmailAddress,
        password: String,
        first_name: String,
        last_name: String,
    ) -> Self {
        Self {
            email,
            password,
            first_name,
            last_name,
        }
    }
}

/// A user row about to be inserted, identity already assigned.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: UserId,
    pub email: EmailAddress,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
}

/// Stored password credential, exactly one per user.
#[derive(Debug, Clone)]
pub struct PasswordCredential {
    pub user_id: UserId,
    pub password_hash: Vec<u8>,
    pub password_salt: Vec<u8>,
}

/// Stored API key credential. The plaintext secret is never part of this
/// record; only its salted hash is persisted.
#[derive(Debug, Clone)]
pub struct ApiKeyCredential {
    pub user_id: UserId,
    pub public_id: String,
    pub secret_hash: Vec<u8>,
    pub secret_salt: Vec<u8>,
}

/// A presented or freshly generated API key: non-secret lookup id plus the
/// high-entropy secret, carried on the wire as `publicId.secret`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiKey {
    pub public_id: String,
    pub secret: String,
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.public_id, self.secret)
    }
}

impl FromStr for ApiKey {
    type Err = ApiKeyFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('.');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(public_id), Some(secret), None) => Ok(Self {
                public_id: public_id.to_string(),
                secret: secret.to_string(),
            }),
            _ => Err(ApiKeyFormatError),
        }
    }
}

const SESSION_TOKEN_BYTES: usize = 32;

/// Opaque server-side session identifier, carried by the session cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Generate a fresh random token.
    pub fn generate() -> Result<Self, auth::RandomError> {
        auth::random::generate_hex(SESSION_TOKEN_BYTES).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for SessionToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}
