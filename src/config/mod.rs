use std::env;

use thiserror::Error;

/// Startup configuration failures. All of these are fatal: the process
/// refuses to start rather than run with a partial security setup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required configuration: {0}")]
    Missing(&'static str),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub security: SecurityConfig,
    pub database: DatabaseConfig,
    pub pagination: PaginationConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

/// Token signing material. Loaded once at startup and injected into the
/// token codec; there is no runtime mutation or rotation path.
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub jwt_audience: String,
    pub token_ttl_hours: i64,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub struct PaginationConfig {
    pub default_page_size: i64,
}

impl AppConfig {
    /// Build configuration from the process environment.
    ///
    /// The signing key, issuer and audience have no defaults; a missing
    /// value aborts startup instead of surfacing later as a per-request
    /// error.
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        let port = env::var("PORT")
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(3000);

        let jwt_secret = require("JWT_SECRET")?;
        let jwt_issuer = require("JWT_ISSUER")?;
        let jwt_audience = require("JWT_AUDIENCE")?;

        let token_ttl_hours = env::var("TOKEN_TTL_HOURS")
            .ok()
            .and_then(|s| s.parse::<i64>().ok())
            .filter(|h| *h > 0)
            .unwrap_or(2);

        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(5);

        let default_page_size = env::var("DEFAULT_PAGE_SIZE")
            .ok()
            .and_then(|s| s.parse::<i64>().ok())
            .filter(|n| *n >= 1)
            .unwrap_or(10);

        Ok(Self {
            environment,
            server: ServerConfig { port },
            security: SecurityConfig {
                jwt_secret,
                jwt_issuer,
                jwt_audience,
                token_ttl_hours,
            },
            database: DatabaseConfig { max_connections },
            pagination: PaginationConfig { default_page_size },
        })
    }
}

fn require(key: &'static str) -> Result<String, ConfigError> {
    match env::var(key) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::Missing(key)),
    }
}
