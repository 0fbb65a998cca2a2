//! In-process store used by the test suites and local experiments.
//!
//! Behaves like the Postgres schema where callers can observe it: ids are
//! sequential from 1, `users.email` is unique (reported as the same
//! `uq_users_email` violation), and listings are newest first.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use internhub_core::types::DbId;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::models::internship::{Internship, InternshipFields};
use crate::models::user::{CreateUser, User};
use crate::repositories::{HealthProbe, InternshipStore, UserStore};

/// Name reported for email collisions, matching the migration.
pub const USERS_EMAIL_CONSTRAINT: &str = "uq_users_email";

struct Table<T> {
    last_id: DbId,
    rows: BTreeMap<DbId, T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            last_id: 0,
            rows: BTreeMap::new(),
        }
    }
}

impl<T> Table<T> {
    fn next_id(&mut self) -> DbId {
        self.last_id += 1;
        self.last_id
    }
}

/// [`UserStore`] + [`InternshipStore`] held in memory behind async locks.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<Table<User>>,
    internships: RwLock<Table<Internship>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create(&self, input: &CreateUser) -> Result<User, StoreError> {
        let mut table = self.users.write().await;
        // Checked under the write lock, so concurrent inserts cannot both pass.
        if table.rows.values().any(|u| u.email == input.email) {
            return Err(StoreError::UniqueViolation {
                constraint: USERS_EMAIL_CONSTRAINT.to_string(),
            });
        }
        let user = User {
            id: table.next_id(),
            name: input.name.clone(),
            email: input.email.clone(),
            password_hash: input.password_hash.clone(),
            role: input.role,
            created_at: Utc::now(),
        };
        table.rows.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let table = self.users.read().await;
        Ok(table.rows.values().find(|u| u.email == email).cloned())
    }
}

#[async_trait]
impl InternshipStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Internship>, StoreError> {
        let table = self.internships.read().await;
        let mut rows: Vec<Internship> = table.rows.values().cloned().collect();
        rows.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(rows)
    }

    async fn create(&self, input: &InternshipFields) -> Result<Internship, StoreError> {
        let mut table = self.internships.write().await;
        let now = Utc::now();
        let row = Internship {
            id: table.next_id(),
            title: input.title.clone(),
            skills: input.skills.clone(),
            duration: input.duration.clone(),
            mode: input.mode,
            stipend: input.stipend.clone(),
            status: input.status,
            link: input.link.clone(),
            description: input.description.clone(),
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update(
        &self,
        id: DbId,
        input: &InternshipFields,
    ) -> Result<Option<Internship>, StoreError> {
        let mut table = self.internships.write().await;
        let Some(row) = table.rows.get_mut(&id) else {
            return Ok(None);
        };
        row.title = input.title.clone();
        row.skills = input.skills.clone();
        row.duration = input.duration.clone();
        row.mode = input.mode;
        row.stipend = input.stipend.clone();
        row.status = input.status;
        row.link = input.link.clone();
        row.description = input.description.clone();
        row.updated_at = Utc::now();
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: DbId) -> Result<Option<Internship>, StoreError> {
        let mut table = self.internships.write().await;
        Ok(table.rows.remove(&id))
    }
}

#[async_trait]
impl HealthProbe for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
