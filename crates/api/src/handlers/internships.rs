//! Handlers for `/api/internships`.
//!
//! Listing is public; create, update and delete require the admin role.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use internhub_core::types::DbId;
use internhub_db::models::internship::Internship;
use serde::Serialize;

use crate::error::AppResult;
use crate::extractors::{IdPath, JsonBody};
use crate::middleware::rbac::RequireAdmin;
use crate::services::internships::InternshipRequest;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct InternshipListResponse {
    pub internships: Vec<Internship>,
}

#[derive(Debug, Serialize)]
pub struct InternshipResponse {
    pub internship: Internship,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// GET /api/internships
pub async fn list_internships(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let internships = state.internships.list().await?;
    Ok(Json(InternshipListResponse { internships }))
}

/// POST /api/internships
pub async fn create_internship(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<InternshipRequest>,
) -> AppResult<impl IntoResponse> {
    let internship = state.internships.create(&admin, input).await?;
    Ok((StatusCode::CREATED, Json(InternshipResponse { internship })))
}

/// PUT /api/internships/{id}
///
/// Full replace. Omitted optional fields are cleared.
pub async fn update_internship(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    IdPath(id): IdPath<DbId>,
    JsonBody(input): JsonBody<InternshipRequest>,
) -> AppResult<impl IntoResponse> {
    let internship = state.internships.update(&admin, id, input).await?;
    Ok(Json(InternshipResponse { internship }))
}

/// DELETE /api/internships/{id}
pub async fn delete_internship(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    IdPath(id): IdPath<DbId>,
) -> AppResult<impl IntoResponse> {
    state.internships.delete(&admin, id).await?;
    Ok(Json(MessageResponse {
        message: "Internship deleted successfully",
    }))
}
