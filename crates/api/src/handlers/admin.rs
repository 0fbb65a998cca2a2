use axum::response::IntoResponse;
use axum::Json;

use super::internships::MessageResponse;
use crate::middleware::rbac::RequireAdmin;

/// GET /api/admin/dashboard
pub async fn dashboard(RequireAdmin(admin): RequireAdmin) -> impl IntoResponse {
    tracing::debug!(user_id = admin.user_id, "Admin dashboard accessed");
    Json(MessageResponse {
        message: "Welcome Admin",
    })
}
