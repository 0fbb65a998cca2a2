//! Persistence for InternHub: connection pool, migrations, and the store
//! traits the API services are written against.

pub mod error;
pub mod memory;
pub mod models;
pub mod repositories;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};

pub use error::StoreError;
use memory::MemoryStore;
use repositories::{HealthProbe, InternshipRepo, InternshipStore, UserRepo, UserStore};

pub type DbPool = sqlx::PgPool;

/// Connection settings for the Postgres pool.
#[derive(Clone)]
pub struct DbConfig {
    /// Full connection URL. When set it wins over the individual parts.
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
    /// `true` requires TLS, `false` lets the server decide.
    pub ssl: bool,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("url", &self.url.as_ref().map(|_| "<redacted>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("ssl", &self.ssl)
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout_secs", &self.acquire_timeout_secs)
            .finish_non_exhaustive()
    }
}

impl DbConfig {
    /// Build sqlx connect options from the configured parts.
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        let options = match &self.url {
            Some(url) => url.parse::<PgConnectOptions>()?,
            None => PgConnectOptions::new()
                .host(&self.host)
                .port(self.port)
                .database(&self.database)
                .username(&self.user)
                .password(&self.password),
        };
        let ssl_mode = if self.ssl {
            PgSslMode::Require
        } else {
            PgSslMode::Prefer
        };
        Ok(options.ssl_mode(ssl_mode))
    }
}

/// Create a bounded connection pool.
///
/// Exhaustion makes callers wait up to `acquire_timeout_secs` and then fail
/// with a pool timeout instead of blocking forever.
pub async fn create_pool(config: &DbConfig) -> Result<DbPool, sqlx::Error> {
    tracing::debug!(
        host = %config.host,
        database = %config.database,
        from_url = config.url.is_some(),
        "Connecting to Postgres"
    );
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect_with(config.connect_options()?)
        .await
}

/// Run a trivial query to confirm the database answers.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded migrations in `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

#[async_trait]
impl HealthProbe for DbPool {
    async fn ping(&self) -> Result<(), StoreError> {
        health_check(self).await.map_err(StoreError::from)
    }
}

/// The set of stores handed to the API layer at startup.
#[derive(Clone)]
pub struct Store {
    pub users: Arc<dyn UserStore>,
    pub internships: Arc<dyn InternshipStore>,
    pub probe: Arc<dyn HealthProbe>,
}

impl Store {
    /// Stores backed by a Postgres pool.
    pub fn postgres(pool: DbPool) -> Self {
        Self {
            users: Arc::new(UserRepo::new(pool.clone())),
            internships: Arc::new(InternshipRepo::new(pool.clone())),
            probe: Arc::new(pool),
        }
    }

    /// Stores backed by a fresh, empty [`MemoryStore`].
    pub fn in_memory() -> Self {
        let memory = Arc::new(MemoryStore::new());
        Self {
            users: memory.clone(),
            internships: memory.clone(),
            probe: memory,
        }
    }
}
