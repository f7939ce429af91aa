use async_trait::async_trait;
use sqlx::PgPool;

use crate::config::SessionConfig;
use crate::domain::auth::errors::SessionStoreError;
use crate::domain::auth::models::SessionToken;
use crate::domain::auth::ports::SessionStore;

/// Postgres-backed session store.
///
/// Each session is one row holding a jsonb key-value map. Expiry is a
/// sliding idle deadline, bumped on every read and capped at
/// `created_at + lifetime`; expired rows read as absent and are reaped by
/// the next write or destroy on the same token.
pub struct PostgresSessionStore {
    pool: PgPool,
    idle_seconds: i64,
    lifetime_seconds: i64,
}

impl PostgresSessionStore {
    pub fn new(pool: PgPool, config: &SessionConfig) -> Self {
        Self {
            pool,
            idle_seconds: config.idle_seconds,
            lifetime_seconds: config.lifetime_seconds,
        }
    }
}

fn backend_error(e: sqlx::Error) -> SessionStoreError {
    SessionStoreError::Backend(e.to_string())
}

#[async_trait]
impl SessionStore for PostgresSessionStore {
    async fn read(
        &self,
        token: &SessionToken,
        key: &str,
    ) -> Result<Option<String>, SessionStoreError> {
        // Reading is also the touch that slides the idle deadline.
        let value: Option<Option<String>> = sqlx::query_scalar(
            r#"
            UPDATE sessions
            SET expires_at = least(
                created_at + make_interval(secs => $3),
                now() + make_interval(secs => $4)
            )
            WHERE token = $1 AND expires_at > now()
            RETURNING data ->> $2::text
            "#,
        )
        .bind(token.as_str())
        .bind(key)
        .bind(self.lifetime_seconds as f64)
        .bind(self.idle_seconds as f64)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend_error)?;

        Ok(value.flatten())
    }

    async fn write(
        &self,
        token: &SessionToken,
        key: &str,
        value: &str,
    ) -> Result<(), SessionStoreError> {
        sqlx::query(
            r#"
            INSERT INTO sessions (token, data, created_at, expires_at)
            VALUES (
                $1,
                jsonb_build_object($2::text, $3::text),
                now(),
                now() + make_interval(secs => least($4, $5))
            )
            ON CONFLICT (token) DO UPDATE
            SET data = CASE
                    WHEN sessions.expires_at > now() THEN sessions.data || excluded.data
                    ELSE excluded.data
                END,
                created_at = CASE
                    WHEN sessions.expires_at > now() THEN sessions.created_at
                    ELSE now()
                END,
                expires_at = CASE
                    WHEN sessions.expires_at > now() THEN least(
                        sessions.created_at + make_interval(secs => $5),
                        now() + make_interval(secs => $4)
                    )
                    ELSE now() + make_interval(secs => least($4, $5))
                END
            "#,
        )
        .bind(token.as_str())
        .bind(key)
        .bind(value)
        .bind(self.idle_seconds as f64)
        .bind(self.lifetime_seconds as f64)
        .execute(&self.pool)
        .await
        .map_err(backend_error)?;

        Ok(())
    }

    async fn destroy(&self, token: &SessionToken) -> Result<(), SessionStoreError> {
        sqlx::query("DELETE FROM sessions WHERE token = $1")
            .bind(token.as_str())
            .execute(&self.pool)
            .await
            .map_err(backend_error)?;

        Ok(())
    }
}
