//! Middleware for the Users API
//!
//! Request tracing, security headers and CORS.

mod cors;
mod security;
mod tracing;

pub use cors::cors_layer;
pub use security::{hsts_header, security_headers};
pub use tracing::{request_tracing, REQUEST_ID_HEADER};
