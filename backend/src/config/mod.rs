//! Configuration management for the Users API
//!
//! This module handles loading and validating configuration from environment variables,
//! with support for different environments (development, staging, production).

use std::env;
use std::net::IpAddr;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid environment value: {0}")]
    InvalidValue(String),

    #[error("Invalid port number: {0}")]
    InvalidPort(String),

    #[error("Invalid host address: {0}")]
    InvalidHost(String),
}

/// Application environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    /// Parse environment from string
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        match s.to_lowercase().as_str() {
            "dev" | "development" => Ok(Environment::Development),
            "staging" => Ok(Environment::Staging),
            "prod" | "production" => Ok(Environment::Production),
            _ => Err(ConfigError::InvalidValue(format!(
                "Invalid environment: '{}'. Expected: dev, staging, or prod",
                s
            ))),
        }
    }

    /// Check if this is a production environment
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    /// Get the environment name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Database connection URL
    pub database_url: String,

    /// Maximum database connections
    pub db_max_connections: u32,

    /// Create the users table on startup when it is missing
    pub db_bootstrap_schema: bool,

    /// Current environment
    pub environment: Environment,

    /// Address to bind
    pub host: IpAddr,

    /// Server port
    pub port: u16,

    /// CORS allowed origins
    pub cors_allowed_origins: Option<String>,

    /// Log level (RUST_LOG)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors)
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// `from_env` delegates here; tests pass a map instead of mutating the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT")
            .map(|s| Environment::parse(&s))
            .unwrap_or(Ok(Environment::Development))?;

        let database_url = match lookup("DATABASE_URL") {
            Some(url) => url,
            None => database_url_from_parts(&lookup)?,
        };

        let db_max_connections = lookup("DB_MAX_CONNECTIONS")
            .and_then(|s| s.parse::<u32>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(1);

        let db_bootstrap_schema = lookup("DB_BOOTSTRAP_SCHEMA")
            .map(|s| matches!(s.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let host = lookup("HOST")
            .unwrap_or_else(|| "127.0.0.1".to_string())
            .parse::<IpAddr>()
            .map_err(|_| ConfigError::InvalidHost("HOST must be an IP address".to_string()))?;

        let port = lookup("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort("PORT must be a valid number".to_string()))?;

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS").filter(|s| !s.trim().is_empty());

        let log_level = lookup("RUST_LOG").unwrap_or_else(|| "info".to_string());

        Ok(Config {
            database_url,
            db_max_connections,
            db_bootstrap_schema,
            environment,
            host,
            port,
            cors_allowed_origins,
            log_level,
        })
    }

    /// Get database URL (useful for logging masked version)
    pub fn database_url_masked(&self) -> String {
        // Mask password in database URL for logging
        let authority_start = self
            .database_url
            .find("://")
            .map(|pos| pos + 3)
            .unwrap_or(0);

        if let Some(at_pos) = self.database_url.rfind('@') {
            if at_pos > authority_start {
                let userinfo = &self.database_url[authority_start..at_pos];
                if let Some(colon_pos) = userinfo.find(':') {
                    let prefix = &self.database_url[..authority_start + colon_pos + 1];
                    let suffix = &self.database_url[at_pos..];
                    return format!("{}****{}", prefix, suffix);
                }
            }
        }
        self.database_url.clone()
    }
}

/// Assemble a connection URL from `DB_USERNAME`, `DB_PASSWORD`, `DB_HOST` and `DB_NAME`.
fn database_url_from_parts<F>(lookup: &F) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let username = lookup("DB_USERNAME").ok_or_else(|| {
        ConfigError::MissingEnvVar("DATABASE_URL or DB_USERNAME".to_string())
    })?;
    let password = lookup("DB_PASSWORD")
        .ok_or_else(|| ConfigError::MissingEnvVar("DB_PASSWORD".to_string()))?;
    let host = lookup("DB_HOST").unwrap_or_else(|| "localhost".to_string());
    let name = lookup("DB_NAME").unwrap_or_else(|| "rocketship".to_string());

    Ok(format!(
        "postgresql://{}:{}@{}/{}",
        username, password, host, name
    ))
}
