use std::str::FromStr;

use axum::http::HeaderValue;
use internhub_db::DbConfig;

use crate::auth::jwt::JwtConfig;
use crate::auth::password::WorkFactor;

/// Startup configuration error. The binary refuses to start on any of these.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set and non-empty")]
    Missing(&'static str),

    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Server configuration loaded from environment variables.
///
/// All fields except the signing secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `FRONTEND_URL`.
    pub cors_origins: Vec<HeaderValue>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Token signing secret and lifetime.
    pub jwt: JwtConfig,
    /// Argon2 cost parameters for new password digests.
    pub work_factor: WorkFactor,
    /// Postgres connection settings.
    pub database: DbConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                  |
    /// |---------------------------|--------------------------|
    /// | `HOST`                    | `0.0.0.0`                |
    /// | `PORT`                    | `5000`                   |
    /// | `FRONTEND_URL`            | `http://localhost:5173`  |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                     |
    /// | `ARGON2_MEMORY_KIB`       | `19456`                  |
    /// | `ARGON2_ITERATIONS`       | `2`                      |
    /// | `ARGON2_PARALLELISM`      | `1`                      |
    /// | `DATABASE_URL`            | unset (use `DB_*` below) |
    /// | `DB_HOST`                 | `localhost`              |
    /// | `DB_PORT`                 | `5432`                   |
    /// | `DB_NAME`                 | `company_auth_db`        |
    /// | `DB_USER`                 | `postgres`               |
    /// | `DB_PASSWORD`             | empty                    |
    /// | `DB_SSL`                  | `false`                  |
    /// | `DB_MAX_CONNECTIONS`      | `10`                     |
    /// | `DB_ACQUIRE_TIMEOUT_SECS` | `5`                      |
    ///
    /// `JWT_SECRET` and `JWT_EXPIRY_HOURS` are read by [`JwtConfig::from_env`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env_or("HOST", "0.0.0.0".to_string())?;
        let port: u16 = env_or("PORT", 5000)?;

        let raw_origins = env_or("FRONTEND_URL", "http://localhost:5173".to_string())?;
        let cors_origins = parse_origins(&raw_origins)?;

        let request_timeout_secs: u64 = env_or("REQUEST_TIMEOUT_SECS", 30)?;

        let defaults = WorkFactor::default();
        let work_factor = WorkFactor {
            memory_kib: env_or("ARGON2_MEMORY_KIB", defaults.memory_kib)?,
            iterations: env_or("ARGON2_ITERATIONS", defaults.iterations)?,
            parallelism: env_or("ARGON2_PARALLELISM", defaults.parallelism)?,
        };

        let database = DbConfig {
            url: std::env::var("DATABASE_URL").ok().filter(|v| !v.is_empty()),
            host: env_or("DB_HOST", "localhost".to_string())?,
            port: env_or("DB_PORT", 5432)?,
            database: env_or("DB_NAME", "company_auth_db".to_string())?,
            user: env_or("DB_USER", "postgres".to_string())?,
            password: std::env::var("DB_PASSWORD").unwrap_or_default(),
            ssl: env_or("DB_SSL", false)?,
            max_connections: env_or("DB_MAX_CONNECTIONS", 10)?,
            acquire_timeout_secs: env_or("DB_ACQUIRE_TIMEOUT_SECS", 5)?,
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env()?,
            work_factor,
            database,
        })
    }
}

/// Split a comma-separated origin list into header values.
pub fn parse_origins(raw: &str) -> Result<Vec<HeaderValue>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|_| ConfigError::Invalid {
                name: "FRONTEND_URL",
                value: origin.to_string(),
            })
        })
        .collect()
}

/// Read `name`, falling back to `default` when unset or empty.
pub(crate) fn env_or<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => {
            raw.trim().parse().map_err(|_| ConfigError::Invalid { name, value: raw })
        }
        _ => Ok(default),
    }
}

/// Read `name`, failing if it is unset or empty.
pub(crate) fn required_env(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(name))
}
