pub mod admin;
pub mod auth;
pub mod health;
pub mod internships;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /auth           signup, login
/// /internships    list (public), create / update / delete (admin)
/// /admin          dashboard (admin)
/// /health         store liveness
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/internships", internships::router())
        .nest("/admin", admin::router())
        .merge(health::router())
}
