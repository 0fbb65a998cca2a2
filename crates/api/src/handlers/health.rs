use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub version: &'static str,
}

/// GET /api/health
///
/// Pings the store. 200 `{ ok: true }` when reachable, 500 `{ ok: false }`
/// otherwise.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let version = env!("CARGO_PKG_VERSION");
    match state.store.probe.ping().await {
        Ok(()) => (StatusCode::OK, Json(HealthResponse { ok: true, version })),
        Err(err) => {
            tracing::error!(error = %err, "Health check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(HealthResponse { ok: false, version }),
            )
        }
    }
}
