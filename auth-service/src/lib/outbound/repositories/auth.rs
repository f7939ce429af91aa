use async_trait::async_trait;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::ApiKeyCredential;
use crate::domain::auth::models::NewUser;
use crate::domain::auth::models::PasswordCredential;
use crate::domain::auth::models::UserId;
use crate::domain::auth::ports::AuthRepository;

pub struct PostgresAuthRepository {
    pool: PgPool,
}

impl PostgresAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct PasswordCredentialRow {
    user_id: Uuid,
    password_hash: Vec<u8>,
    password_salt: Vec<u8>,
}

#[derive(FromRow)]
struct ApiKeyRow {
    user_id: Uuid,
    public_id: String,
    secret_hash: Vec<u8>,
    secret_salt: Vec<u8>,
}

fn database_error(e: sqlx::Error) -> AuthError {
    AuthError::Database(e.to_string())
}

/// Translate a unique violation on the email constraint into the domain
/// condition; the constraint is the authoritative guard when two
/// registrations race past the existence check.
fn map_user_insert_error(e: sqlx::Error) -> AuthError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() && db_err.constraint() == Some("users_email_key") {
            return AuthError::DuplicateEmail;
        }
    }
    AuthError::Database(e.to_string())
}

#[async_trait]
impl AuthRepository for PostgresAuthRepository {
    async fn create_user_with_password(
        &self,
        user: &NewUser,
        password_hash: &[u8],
        password_salt: &[u8],
    ) -> Result<(), AuthError> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        let email_taken: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(user.email.as_str())
                .fetch_one(&mut *tx)
                .await
                .map_err(database_error)?;
        if email_taken {
            return Err(AuthError::DuplicateEmail);
        }

        sqlx::query(
            r#"
            INSERT INTO users (id, email, first_name, last_name, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user.id.0)
        .bind(user.email.as_str())
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.created_at)
        .execute(&mut *tx)
        .await
        .map_err(map_user_insert_error)?;

        sqlx::query(
            r#"
            INSERT INTO password_credentials (user_id, password_hash, password_salt)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(user.id.0)
        .bind(password_hash)
        .bind(password_salt)
        .execute(&mut *tx)
        .await
        .map_err(database_error)?;

        tx.commit().await.map_err(database_error)
    }

    async fn find_password_credential(
        &self,
        email: &str,
    ) -> Result<Option<PasswordCredential>, AuthError> {
        let row = sqlx::query_as::<_, PasswordCredentialRow>(
            r#"
            SELECT u.id AS user_id, c.password_hash, c.password_salt
            FROM users u
            JOIN password_credentials c ON c.user_id = u.id
            WHERE u.email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(row.map(|r| PasswordCredential {
            user_id: UserId(r.user_id),
            password_hash: r.password_hash,
            password_salt: r.password_salt,
        }))
    }

    async fn api_key_public_id_taken(&self, public_id: &str) -> Result<bool, AuthError> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM api_key_credentials WHERE public_id = $1)")
            .bind(public_id)
            .fetch_one(&self.pool)
            .await
            .map_err(database_error)
    }

    async fn create_api_key(&self, credential: &ApiKeyCredential) -> Result<(), AuthError> {
        sqlx::query(
            r#"
            INSERT INTO api_key_credentials (public_id, user_id, secret_hash, secret_salt)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&credential.public_id)
        .bind(credential.user_id.0)
        .bind(&credential.secret_hash)
        .bind(&credential.secret_salt)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(())
    }

    async fn find_api_key(&self, public_id: &str) -> Result<Option<ApiKeyCredential>, AuthError> {
        let row = sqlx::query_as::<_, ApiKeyRow>(
            r#"
            SELECT user_id, public_id, secret_hash, secret_salt
            FROM api_key_credentials
            WHERE public_id = $1
            "#,
        )
        .bind(public_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(row.map(|r| ApiKeyCredential {
            user_id: UserId(r.user_id),
            public_id: r.public_id,
            secret_hash: r.secret_hash,
            secret_salt: r.secret_salt,
        }))
    }
}
