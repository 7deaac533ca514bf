//! Database connection management for the Users API
//!
//! Opens the store handle once at startup and provides the health probe.

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

use crate::config::Config;

/// Database connection error
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Failed to connect to database: {0}")]
    ConnectionError(String),

    #[error("Failed to bootstrap schema: {0}")]
    SchemaError(String),

    #[error("Database health check failed: {0}")]
    HealthCheckError(String),
}

/// Create the shared database handle
pub async fn create_pool(config: &Config) -> Result<PgPool, DbError> {
    tracing::info!("Connecting to database at {}", config.database_url_masked());

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&config.database_url)
        .await
        .map_err(|e| DbError::ConnectionError(e.to_string()))?;

    tracing::info!(
        max_connections = config.db_max_connections,
        "Database connection established"
    );

    Ok(pool)
}

/// Create the `rocketship` schema and user table when they are missing.
///
/// Idempotent. Email uniqueness is left to the service layer.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Ensuring rocketship.user table exists");

    sqlx::query("CREATE SCHEMA IF NOT EXISTS rocketship")
        .execute(pool)
        .await
        .map_err(|e| DbError::SchemaError(e.to_string()))?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS rocketship."user" (
            id    SERIAL PRIMARY KEY,
            name  TEXT NOT NULL,
            email TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(|e| DbError::SchemaError(e.to_string()))?;

    Ok(())
}

/// Check database connectivity (for health checks)
pub async fn check_health(pool: &PgPool) -> Result<(), DbError> {
    sqlx::query("SELECT 1")
        .fetch_one(pool)
        .await
        .map_err(|e| DbError::HealthCheckError(e.to_string()))?;

    Ok(())
}
