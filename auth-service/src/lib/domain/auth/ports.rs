use async_trait::async_trait;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::SessionStoreError;
use crate::domain::auth::models::ApiKeyCredential;
use crate::domain::auth::models::NewUser;
use crate::domain::auth::models::PasswordCredential;
use crate::domain::auth::models::SessionToken;

/// Persistence operations for users and their credentials.
///
/// Deliberately narrow: lookups by email and public id, an existence probe,
/// and inserts. Everything else about users lives elsewhere.
#[async_trait]
pub trait AuthRepository: Send + Sync + 'static {
    /// Atomically create a user row together with its password credential.
    ///
    /// One transaction spans the email-existence check and both inserts, so
    /// no user-without-credential state is ever visible. The store's unique
    /// constraint on email remains the authoritative guard: a concurrent
    /// registration that slips past the check still surfaces as
    /// `DuplicateEmail` on insert.
    ///
    /// # Errors
    /// * `DuplicateEmail` - the email is already registered
    /// * `Database` - the transaction failed
    async fn create_user_with_password(
        &self,
        user: &NewUser,
        password_hash: &[u8],
        password_salt: &[u8],
    ) -> Result<(), AuthError>;

    /// Look up the password credential for an email address.
    ///
    /// # Returns
    /// `None` when no such email is registered
    ///
    /// # Errors
    /// * `Database` - the query failed
    async fn find_password_credential(
        &self,
        email: &str,
    ) -> Result<Option<PasswordCredential>, AuthError>;

    /// Check whether an API key public id is already in use.
    ///
    /// # Errors
    /// * `Database` - the query failed
    async fn api_key_public_id_taken(&self, public_id: &str) -> Result<bool, AuthError>;

    /// Persist a new API key credential.
    ///
    /// # Errors
    /// * `Database` - the insert failed, including the (astronomically
    ///   unlikely) case of a racing insert winning the same public id
    async fn create_api_key(&self, credential: &ApiKeyCredential) -> Result<(), AuthError>;

    /// Look up an API key credential by its public id.
    ///
    /// # Returns
    /// `None` when the public id is unknown
    ///
    /// # Errors
    /// * `Database` - the query failed
    async fn find_api_key(&self, public_id: &str) -> Result<Option<ApiKeyCredential>, AuthError>;
}

/// Server-side session storage, keyed by an opaque cookie-carried token.
///
/// The store owns expiry (sliding idle deadline capped by an absolute
/// lifetime); this core only reads, writes, and destroys.
#[async_trait]
pub trait SessionStore: Send + Sync + 'static {
    /// Read a string value from the session, `None` when the session does
    /// not exist, has expired, or holds no such key.
    async fn read(
        &self,
        token: &SessionToken,
        key: &str,
    ) -> Result<Option<String>, SessionStoreError>;

    /// Write a string value into the session, creating it if needed.
    async fn write(
        &self,
        token: &SessionToken,
        key: &str,
        value: &str,
    ) -> Result<(), SessionStoreError>;

    /// Destroy the session. Destroying an absent session is not an error.
    async fn destroy(&self, token: &SessionToken) -> Result<(), SessionStoreError>;
}

/// Session key under which the authenticated user id is stored.
pub const SESSION_USER_ID_KEY: &str = "user_id";
