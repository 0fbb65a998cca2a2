use axum::routing::{get, put};
use axum::Router;

use crate::handlers::internships;
use crate::state::AppState;

/// Routes mounted at `/api/internships`.
///
/// ```text
/// GET    /        -> list_internships
/// POST   /        -> create_internship (admin)
/// PUT    /{id}    -> update_internship (admin)
/// DELETE /{id}    -> delete_internship (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(internships::list_internships).post(internships::create_internship),
        )
        .route(
            "/{id}",
            put(internships::update_internship).delete(internships::delete_internship),
        )
}
