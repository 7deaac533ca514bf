use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::{ApiError, ApiResult};
use crate::models::{NewUser, User};

use super::UserStore;

/// SQLSTATE for unique_violation
const UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL-backed user store over the `rocketship."user"` table
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// A unique index on `email`, where one exists, surfaces as a conflict
fn map_write_error(err: sqlx::Error) -> ApiError {
    match err {
        sqlx::Error::Database(ref db_err) if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) => {
            ApiError::duplicate_email()
        }
        other => ApiError::from(other),
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn fetch_all(&self) -> ApiResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(r#"SELECT id, name, email FROM rocketship."user""#)
            .fetch_all(&self.pool)
            .await?;

        Ok(users)
    }

    async fn fetch_by_id(&self, id: i32) -> ApiResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"SELECT id, name, email FROM rocketship."user" WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn fetch_by_email(&self, email: &str) -> ApiResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"SELECT id, name, email FROM rocketship."user" WHERE email = $1 LIMIT 1"#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn insert(&self, user: &NewUser) -> ApiResult<i32> {
        let id: i32 = sqlx::query_scalar(
            r#"INSERT INTO rocketship."user" (name, email) VALUES ($1, $2) RETURNING id"#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(id)
    }

    async fn update(&self, user: &User) -> ApiResult<u64> {
        let result = sqlx::query(r#"UPDATE rocketship."user" SET name = $1, email = $2 WHERE id = $3"#)
            .bind(&user.name)
            .bind(&user.email)
            .bind(user.id)
            .execute(&self.pool)
            .await
            .map_err(map_write_error)?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: i32) -> ApiResult<u64> {
        let result = sqlx::query(r#"DELETE FROM rocketship."user" WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn ping(&self) -> ApiResult<()> {
        crate::db::check_health(&self.pool)
            .await
            .map_err(|e| ApiError::ServiceUnavailable(e.to_string()))
    }
}
