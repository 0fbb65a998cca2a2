use std::sync::Arc;

use internhub_db::Store;

use crate::auth::jwt::TokenIssuer;
use crate::auth::password::{HashError, PasswordHasher};
use crate::config::ServerConfig;
use crate::services::credentials::CredentialService;
use crate::services::internships::InternshipService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Built once at startup. Cheaply cloneable (everything is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Persistence backends (Postgres in production, in-memory in tests).
    pub store: Store,
    /// Token signer/verifier used by the auth gate and the credential service.
    pub tokens: Arc<TokenIssuer>,
    pub credentials: Arc<CredentialService>,
    pub internships: Arc<InternshipService>,
}

impl AppState {
    /// Fails only if the configured Argon2 work factor is invalid.
    pub fn new(config: ServerConfig, store: Store) -> Result<Self, HashError> {
        let tokens = Arc::new(TokenIssuer::new(&config.jwt));
        let hasher = PasswordHasher::new(config.work_factor)?;
        let credentials = Arc::new(CredentialService::new(
            Arc::clone(&store.users),
            hasher,
            Arc::clone(&tokens),
        )?);
        let internships = Arc::new(InternshipService::new(Arc::clone(&store.internships)));

        Ok(Self {
            config: Arc::new(config),
            store,
            tokens,
            credentials,
            internships,
        })
    }
}
