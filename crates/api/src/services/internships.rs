//! Internship postings: public listing and admin-only mutations.

use std::sync::Arc;

use internhub_core::error::CoreError;
use internhub_core::internship::{InternshipMode, InternshipStatus};
use internhub_core::types::DbId;
use internhub_core::validation::{non_blank, require_fields};
use internhub_db::models::internship::{Internship, InternshipFields};
use internhub_db::repositories::InternshipStore;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::guard::{authorize, Identity, ADMIN_ONLY};

const ENTITY: &str = "Internship";

/// Body of `POST /api/internships` and `PUT /api/internships/{id}`.
///
/// Every field is optional at the wire level so that missing required fields
/// are reported together instead of failing on the first one.
#[derive(Debug, Default, Deserialize)]
pub struct InternshipRequest {
    pub title: Option<String>,
    pub skills: Option<Vec<String>>,
    pub duration: Option<String>,
    pub mode: Option<String>,
    pub stipend: Option<String>,
    pub status: Option<String>,
    pub link: Option<String>,
    pub description: Option<String>,
}

impl InternshipRequest {
    /// Validate and normalise into the field set the store writes.
    pub fn into_fields(self) -> Result<InternshipFields, CoreError> {
        require_fields(&[
            ("title", self.title.as_deref()),
            ("duration", self.duration.as_deref()),
            ("mode", self.mode.as_deref()),
            ("stipend", self.stipend.as_deref()),
        ])?;

        let mode: InternshipMode = self.mode.as_deref().unwrap_or_default().parse()?;
        let status = match non_blank(self.status) {
            Some(raw) => raw.parse::<InternshipStatus>()?,
            None => InternshipStatus::default(),
        };

        let skills = self
            .skills
            .unwrap_or_default()
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(InternshipFields {
            title: self.title.unwrap_or_default().trim().to_string(),
            skills,
            duration: self.duration.unwrap_or_default().trim().to_string(),
            mode,
            stipend: self.stipend.unwrap_or_default().trim().to_string(),
            status,
            link: non_blank(self.link),
            description: non_blank(self.description),
        })
    }
}

pub struct InternshipService {
    store: Arc<dyn InternshipStore>,
}

impl InternshipService {
    pub fn new(store: Arc<dyn InternshipStore>) -> Self {
        Self { store }
    }

    /// All postings, newest first. Public.
    pub async fn list(&self) -> AppResult<Vec<Internship>> {
        Ok(self.store.list().await?)
    }

    pub async fn create(
        &self,
        actor: &Identity,
        input: InternshipRequest,
    ) -> AppResult<Internship> {
        authorize(Some(actor), ADMIN_ONLY)?;
        let fields = input.into_fields()?;
        let internship = self.store.create(&fields).await?;

        tracing::info!(
            internship_id = internship.id,
            title = %internship.title,
            user_id = actor.user_id,
            email = %actor.email,
            "Internship created",
        );

        Ok(internship)
    }

    /// Full replace of an existing posting.
    pub async fn update(
        &self,
        actor: &Identity,
        id: DbId,
        input: InternshipRequest,
    ) -> AppResult<Internship> {
        authorize(Some(actor), ADMIN_ONLY)?;
        let fields = input.into_fields()?;
        let internship = self
            .store
            .update(id, &fields)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;

        tracing::info!(
            internship_id = internship.id,
            user_id = actor.user_id,
            email = %actor.email,
            "Internship updated",
        );

        Ok(internship)
    }

    /// Remove a posting and return what was removed.
    pub async fn delete(&self, actor: &Identity, id: DbId) -> AppResult<Internship> {
        authorize(Some(actor), ADMIN_ONLY)?;
        let internship = self
            .store
            .delete(id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;

        tracing::info!(
            internship_id = internship.id,
            user_id = actor.user_id,
            email = %actor.email,
            "Internship deleted",
        );

        Ok(internship)
    }
}
