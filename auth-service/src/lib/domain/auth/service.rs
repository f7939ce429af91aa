use std::sync::Arc;

use chrono::Utc;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::ApiKey;
use crate::domain::auth::models::ApiKeyCredential;
use crate::domain::auth::models::NewUser;
use crate::domain::auth::models::RegisterUserCommand;
use crate::domain::auth::models::UserId;
use crate::domain::auth::ports::AuthRepository;

/// Random bytes in an API key public id (16 hex characters on the wire).
const PUBLIC_ID_BYTES: usize = 8;

/// Random bytes in an API key secret (64 hex characters on the wire).
const SECRET_BYTES: usize = 32;

/// Total attempts at finding an unused public id before giving up.
const PUBLIC_ID_ATTEMPTS: u32 = 10;

/// Domain service for password and API key credentials.
///
/// Owns registration, password verification, and the API key lifecycle.
/// Token issuance lives in [`super::token::TokenService`].
pub struct AuthService<R>
where
    R: AuthRepository,
{
    repository: Arc<R>,
    password_hasher: auth::PasswordHasher,
}

impl<R> AuthService<R>
where
    R: AuthRepository,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            password_hasher: auth::PasswordHasher::new(),
        }
    }

    /// Register a new user with password-based authentication.
    ///
    /// The user row and its password credential are created in one
    /// transaction; a taken email aborts the whole registration. Email
    /// verification is out of scope.
    ///
    /// # Errors
    /// * `DuplicateEmail` - the email is already registered
    /// * `Entropy` / `Hashing` - salt generation or hashing failed
    /// * `Database` - the transaction failed
    pub async fn register(&self, command: RegisterUserCommand) -> Result<(), AuthError> {
        let salt = auth::random::generate_salt()?;
        let hash = self.password_hasher.hash(&command.password, &salt)?;

        let user = NewUser {
            id: UserId::new(),
            email: command.email,
            first_name: command.first_name,
            last_name: command.last_name,
            created_at: Utc::now(),
        };

        self.repository
            .create_user_with_password(&user, &hash, &salt)
            .await
    }

    /// Verify an email/password pair and return the owning user id.
    ///
    /// An unknown email and a wrong password are indistinguishable to the
    /// caller; both come back as `InvalidCredentials`. The digest comparison
    /// is constant time.
    ///
    /// # Errors
    /// * `InvalidCredentials` - no such email, or the password is wrong
    /// * `Database` - the lookup failed
    pub async fn check_password(&self, email: &str, password: &str) -> Result<UserId, AuthError> {
        let credential = self
            .repository
            .find_password_credential(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let matches = self.password_hasher.verify(
            password,
            &credential.password_salt,
            &credential.password_hash,
        )?;
        if !matches {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(credential.user_id)
    }

    /// Generate a new API key for a user.
    ///
    /// The returned [`ApiKey`] is the only time the plaintext secret exists
    /// outside the caller's hands; only its salted hash is persisted, so a
    /// lost key must be regenerated.
    ///
    /// # Errors
    /// * `PublicIdExhausted` - no unused public id found within the retry
    ///   budget
    /// * `Entropy` / `Hashing` - secret generation or hashing failed
    /// * `Database` - persisting the credential failed
    pub async fn generate_api_key(&self, user_id: &UserId) -> Result<ApiKey, AuthError> {
        let public_id = generate_public_id(self.repository.as_ref()).await?;
        let secret = auth::random::generate_hex(SECRET_BYTES)?;

        let secret_salt = auth::random::generate_salt()?;
        let secret_hash = self.password_hasher.hash(&secret, &secret_salt)?;

        let credential = ApiKeyCredential {
            user_id: *user_id,
            public_id: public_id.clone(),
            secret_hash: secret_hash.to_vec(),
            secret_salt: secret_salt.to_vec(),
        };
        self.repository.create_api_key(&credential).await?;

        Ok(ApiKey { public_id, secret })
    }

    /// Validate a presented API key and return the owning user id.
    ///
    /// # Errors
    /// * `ApiKeyInvalid` - unknown public id, or the secret does not match
    /// * `Database` - the lookup failed
    pub async fn validate_api_key(&self, key: &ApiKey) -> Result<UserId, AuthError> {
        let credential = self
            .repository
            .find_api_key(&key.public_id)
            .await?
            .ok_or(AuthError::ApiKeyInvalid)?;

        let matches = self.password_hasher.verify(
            &key.secret,
            &credential.secret_salt,
            &credential.secret_hash,
        )?;
        if !matches {
            return Err(AuthError::ApiKeyInvalid);
        }

        Ok(credential.user_id)
    }
}

/// Find an unused public id by optimistic probing.
///
/// No lock is held between the probe and the later insert; two concurrent
/// generations could in principle race on the same candidate, which the id
/// space makes overwhelmingly unlikely. A racing insert failure surfaces
/// from `create_api_key` as a generation failure for the caller to retry.
async fn generate_public_id<R>(repository: &R) -> Result<String, AuthError>
where
    R: AuthRepository,
{
    for _ in 0..PUBLIC_ID_ATTEMPTS {
        let candidate = auth::random::generate_hex(PUBLIC_ID_BYTES)?;
        if !repository.api_key_public_id_taken(&candidate).await? {
            return Ok(candidate);
        }
    }

    Err(AuthError::PublicIdExhausted {
        length: PUBLIC_ID_BYTES * 2,
        attempts: PUBLIC_ID_ATTEMPTS,
    })
}
