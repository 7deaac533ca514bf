//! Route definitions for the Users API

mod user;

pub use user::user_routes;

use axum::{middleware::from_fn, routing::get, Router};
use tower::ServiceBuilder;

use crate::config::Config;
use crate::handlers::{health_check, root};
use crate::middleware;
use crate::state::AppState;

/// Service banner and health probe
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
}

/// Full application router with middleware applied
pub fn app(state: AppState, config: &Config) -> Router {
    let mut router = Router::new()
        .merge(health_routes())
        .merge(user_routes())
        .with_state(state);

    if config.environment.is_production() {
        router = router.layer(from_fn(middleware::hsts_header));
    }

    router.layer(
        ServiceBuilder::new()
            .layer(middleware::cors_layer(config.cors_allowed_origins.as_deref()))
            .layer(from_fn(middleware::request_tracing))
            .layer(from_fn(middleware::security_headers)),
    )
}
