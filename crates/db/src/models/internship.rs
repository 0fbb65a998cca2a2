//! Internship posting model and write DTO.

use internhub_core::internship::{InternshipMode, InternshipStatus};
use internhub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full row from the `internships` table.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Internship {
    pub id: DbId,
    pub title: String,
    pub skills: Vec<String>,
    pub duration: String,
    #[sqlx(try_from = "String")]
    pub mode: InternshipMode,
    pub stipend: String,
    #[sqlx(try_from = "String")]
    pub status: InternshipStatus,
    pub link: Option<String>,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Validated field set written by both create and update.
///
/// Update is a full replace, so it takes the same shape as create.
#[derive(Debug, Clone, PartialEq)]
pub struct InternshipFields {
    pub title: String,
    pub skills: Vec<String>,
    pub duration: String,
    pub mode: InternshipMode,
    pub stipend: String,
    pub status: InternshipStatus,
    pub link: Option<String>,
    pub description: Option<String>,
}
