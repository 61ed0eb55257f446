// ABOUTME: Configuration loading and validation for the brewlog server.
// ABOUTME: Reads environment variables once at startup into an explicit config struct.

use std::net::SocketAddr;
use std::path::PathBuf;

use http::HeaderValue;
use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("DATABASE_URL must be a sqlite URL (sqlite:///path) or a file path, got: {0}")]
    UnsupportedDatabaseUrl(String),

    #[error("API_V1_STR must be empty or start with '/' and not end with '/', got: {0}")]
    InvalidPrefix(String),

    #[error("BREWLOG_BIND is not a valid socket address: {0}")]
    InvalidBind(String),

    #[error("BREWLOG_CORS_ORIGIN is not a valid origin header value: {0}")]
    InvalidCorsOrigin(String),
}

pub const DEFAULT_DATABASE_URL: &str = "sqlite:///sql_app.db";
pub const DEFAULT_API_PREFIX: &str = "/api/v1";
pub const DEFAULT_BIND: &str = "127.0.0.1:8000";
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

/// Server configuration, built once at startup and handed to the router.
#[derive(Debug, Clone)]
pub struct BrewlogConfig {
    pub database_path: PathBuf,
    pub api_prefix: String,
    pub bind: SocketAddr,
    pub cors_origin: HeaderValue,
}

impl BrewlogConfig {
    /// Load configuration from environment variables with sensible defaults.
    ///
    /// Environment variables:
    /// - DATABASE_URL: sqlite URL or path (default: sqlite:///sql_app.db)
    /// - API_V1_STR: route prefix (default: /api/v1)
    /// - BREWLOG_BIND: socket address to bind (default: 127.0.0.1:8000)
    /// - BREWLOG_CORS_ORIGIN: front-end origin allowed by CORS (default: http://localhost:3000)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reads from an arbitrary lookup.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = var("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let database_path = parse_database_url(&database_url)?;

        let api_prefix = var("API_V1_STR").unwrap_or_else(|| DEFAULT_API_PREFIX.to_string());
        validate_prefix(&api_prefix)?;

        let bind_str = var("BREWLOG_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind: SocketAddr = bind_str
            .parse()
            .map_err(|_| ConfigError::InvalidBind(bind_str))?;

        let origin = var("BREWLOG_CORS_ORIGIN").unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string());
        let cors_origin =
            HeaderValue::from_str(&origin).map_err(|_| ConfigError::InvalidCorsOrigin(origin))?;

        Ok(Self {
            database_path,
            api_prefix,
            bind,
            cors_origin,
        })
    }

    /// Replace the database location with a URL or path given on the command line.
    pub fn with_database_url(mut self, url: &str) -> Result<Self, ConfigError> {
        self.database_path = parse_database_url(url)?;
        Ok(self)
    }
}

/// Resolve a SQLAlchemy-style sqlite URL to a filesystem path.
///
/// `sqlite:///app.db` is relative, `sqlite:////var/app.db` is absolute.
/// Strings without a scheme are taken as paths.
pub fn parse_database_url(url: &str) -> Result<PathBuf, ConfigError> {
    if let Some(path) = url.strip_prefix("sqlite:///") {
        if path.is_empty() {
            return Err(ConfigError::UnsupportedDatabaseUrl(url.to_string()));
        }
        return Ok(PathBuf::from(path));
    }
    if url.is_empty() || url.contains("://") {
        return Err(ConfigError::UnsupportedDatabaseUrl(url.to_string()));
    }
    Ok(PathBuf::from(url))
}

fn validate_prefix(prefix: &str) -> Result<(), ConfigError> {
    if prefix.is_empty() || (prefix.starts_with('/') && !prefix.ends_with('/')) {
        Ok(())
    } else {
        Err(ConfigError::InvalidPrefix(prefix.to_string()))
    }
}
