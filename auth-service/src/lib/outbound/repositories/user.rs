use async_trait::async_trait;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::domain::auth::models::UserId;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::UserProfile;
use crate::domain::user::ports::UserRepository;

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct ProfileRow {
    first_name: String,
    last_name: String,
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_profile(&self, id: &UserId) -> Result<Option<UserProfile>, UserError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT first_name, last_name
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::Database(e.to_string()))?;

        Ok(row.map(|r| UserProfile {
            first_name: r.first_name,
            last_name: r.last_name,
        }))
    }
}
