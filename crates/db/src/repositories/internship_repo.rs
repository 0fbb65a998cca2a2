//! Repository for the `internships` table.

use async_trait::async_trait;
use internhub_core::types::DbId;

use super::InternshipStore;
use crate::error::StoreError;
use crate::models::internship::{Internship, InternshipFields};
use crate::DbPool;

const COLUMNS: &str = "id, title, skills, duration, mode, stipend, status, link, description, \
                       created_at, updated_at";

/// PostgreSQL-backed [`InternshipStore`].
#[derive(Clone)]
pub struct InternshipRepo {
    pool: DbPool,
}

impl InternshipRepo {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InternshipStore for InternshipRepo {
    async fn list(&self) -> Result<Vec<Internship>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM internships ORDER BY created_at DESC, id DESC");
        let rows = sqlx::query_as::<_, Internship>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn create(&self, input: &InternshipFields) -> Result<Internship, StoreError> {
        let query = format!(
            "INSERT INTO internships
                (title, skills, duration, mode, stipend, status, link, description)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Internship>(&query)
            .bind(&input.title)
            .bind(&input.skills)
            .bind(&input.duration)
            .bind(input.mode.as_str())
            .bind(&input.stipend)
            .bind(input.status.as_str())
            .bind(&input.link)
            .bind(&input.description)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(
        &self,
        id: DbId,
        input: &InternshipFields,
    ) -> Result<Option<Internship>, StoreError> {
        let query = format!(
            "UPDATE internships SET
                title = $2,
                skills = $3,
                duration = $4,
                mode = $5,
                stipend = $6,
                status = $7,
                link = $8,
                description = $9,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Internship>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.skills)
            .bind(&input.duration)
            .bind(input.mode.as_str())
            .bind(&input.stipend)
            .bind(input.status.as_str())
            .bind(&input.link)
            .bind(&input.description)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete(&self, id: DbId) -> Result<Option<Internship>, StoreError> {
        let query = format!("DELETE FROM internships WHERE id = $1 RETURNING {COLUMNS}");
        let row = sqlx::query_as::<_, Internship>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }
}
