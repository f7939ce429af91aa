use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for presented API keys that are not `publicId.secret`.
///
/// A key of the wrong shape never reaches storage; the HTTP layer answers it
/// as a client format error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("api key must be exactly two dot-separated segments")]
pub struct ApiKeyFormatError;

/// Top-level error for credential operations.
///
/// A closed set matched explicitly at the HTTP boundary. Credential
/// rejections (`InvalidCredentials`, `ApiKeyInvalid`) are deliberately
/// carried apart from infrastructure failures so middlewares can answer the
/// former uniformly and log only the latter.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// Unknown email and wrong password produce this same variant, so a
    /// caller cannot probe which addresses are registered.
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("email address already taken")]
    DuplicateEmail,

    #[error("invalid api key")]
    ApiKeyInvalid,

    #[error("no unused api key public id of {length} hex characters found in {attempts} attempts")]
    PublicIdExhausted { length: usize, attempts: u32 },

    #[error("password hashing failed: {0}")]
    Hashing(#[from] auth::PasswordError),

    #[error("entropy source failed: {0}")]
    Entropy(#[from] auth::RandomError),

    #[error("database error: {0}")]
    Database(String),
}

/// Error for token issuance and validation.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("failed to sign token: {0}")]
    Signing(String),

    /// Bad signature, foreign algorithm, expired, or malformed token. Always
    /// the caller's fault; answered 401.
    #[error("invalid token: {0}")]
    InvalidToken(String),

    /// Well-signed token whose subject claim is missing or not a UUID. Only
    /// our own issuer could have produced it, so this surfaces as a server
    /// error, not a client rejection.
    #[error("invalid token claims: {0}")]
    InvalidClaims(String),
}

/// Error for session store operations.
#[derive(Debug, Clone, Error)]
pub enum SessionStoreError {
    #[error("session store error: {0}")]
    Backend(String),
}
