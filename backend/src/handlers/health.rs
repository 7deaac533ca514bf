//! Service banner and health probe

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use crate::models::HealthResponse;
use crate::services::UserService;

pub async fn root() -> &'static str {
    "Users API Server"
}

/// Health check endpoint
pub async fn health_check(
    State(service): State<Arc<UserService>>,
) -> (StatusCode, Json<HealthResponse>) {
    let (status_code, status, database) = match service.ping().await {
        Ok(()) => (StatusCode::OK, "healthy", "connected".to_string()),
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "unhealthy",
                format!("error: {}", e.public_message()),
            )
        }
    };

    (
        status_code,
        Json(HealthResponse {
            status: status.to_string(),
            database,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}
