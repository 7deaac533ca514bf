//! Users API Library
//!
//! CRUD over a single PostgreSQL user table, exposed over HTTP with axum.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
