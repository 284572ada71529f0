//! Application configuration read from the environment at bootstrap.

use std::env;
use std::net::SocketAddr;

use chrono::Duration;
use tracing::warn;
use uuid::Uuid;

/// Default bind address when `BIND_ADDR` is unset.
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
/// Default access-token lifetime in minutes.
const DEFAULT_TOKEN_TTL_MINUTES: i64 = 30;

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("DATABASE_URL must be set")]
    MissingDatabaseUrl,
    #[error("JWT_SECRET must be set in release builds")]
    MissingJwtSecret,
    #[error("BIND_ADDR is not a valid socket address: {0}")]
    InvalidBindAddr(String),
    #[error("ACCESS_TOKEN_TTL_MINUTES is not a positive integer: {0}")]
    InvalidTokenTtl(String),
}

/// Everything the server needs at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub database_url: String,
    pub jwt_secret: String,
    pub token_ttl: Duration,
}

impl AppConfig {
    /// Read configuration from the environment.
    ///
    /// `JWT_SECRET` may be omitted in debug builds only: an ephemeral
    /// random secret is generated, which invalidates all tokens on
    /// restart.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_raw = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_owned());
        let bind_addr = bind_raw
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidBindAddr(bind_raw))?;

        let database_url = env::var("DATABASE_URL").map_err(|_| ConfigError::MissingDatabaseUrl)?;

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) if cfg!(debug_assertions) => {
                warn!("using ephemeral token secret (dev only); tokens die with the process");
                Uuid::new_v4().to_string()
            }
            Err(_) => return Err(ConfigError::MissingJwtSecret),
        };

        let ttl_minutes = match env::var("ACCESS_TOKEN_TTL_MINUTES") {
            Ok(raw) => raw
                .parse::<i64>()
                .ok()
                .filter(|minutes| *minutes > 0)
                .ok_or(ConfigError::InvalidTokenTtl(raw))?,
            Err(_) => DEFAULT_TOKEN_TTL_MINUTES,
        };

        Ok(Self {
            bind_addr,
            database_url,
            jwt_secret,
            token_ttl: Duration::minutes(ttl_minutes),
        })
    }
}
