//! Store traits and their PostgreSQL implementations.
//!
//! Services depend on the traits only. [`UserRepo`] and [`InternshipRepo`]
//! back them with sqlx; [`crate::memory::MemoryStore`] backs them in tests.
//! Every method is a single statement: there are no multi-statement
//! transactions anywhere in the store layer.

mod internship_repo;
mod user_repo;

pub use internship_repo::InternshipRepo;
pub use user_repo::UserRepo;

use async_trait::async_trait;
use internhub_core::types::DbId;

use crate::error::StoreError;
use crate::models::internship::{Internship, InternshipFields};
use crate::models::user::{CreateUser, User};

/// Persistence for user identities.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user. Fails with [`StoreError::UniqueViolation`] if the
    /// email is taken.
    async fn create(&self, input: &CreateUser) -> Result<User, StoreError>;

    /// Find a user by email (case-sensitive).
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
}

/// Persistence for internship postings.
#[async_trait]
pub trait InternshipStore: Send + Sync {
    /// All postings, newest first.
    async fn list(&self) -> Result<Vec<Internship>, StoreError>;

    async fn create(&self, input: &InternshipFields) -> Result<Internship, StoreError>;

    /// Replace every field of a posting and bump `updated_at`.
    ///
    /// Returns `None` if no row with the given `id` exists.
    async fn update(
        &self,
        id: DbId,
        input: &InternshipFields,
    ) -> Result<Option<Internship>, StoreError>;

    /// Delete a posting, returning the removed row (`None` if absent).
    async fn delete(&self, id: DbId) -> Result<Option<Internship>, StoreError>;
}

/// Liveness check used by `GET /api/health`.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    async fn ping(&self) -> Result<(), StoreError>;
}
