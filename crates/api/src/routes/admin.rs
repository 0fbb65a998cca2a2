use axum::routing::get;
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/api/admin`.
pub fn router() -> Router<AppState> {
    Router::new().route("/dashboard", get(admin::dashboard))
}
