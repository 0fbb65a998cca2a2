//! Handlers for `/api/auth`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppResult;
use crate::extractors::JsonBody;
use crate::services::credentials::{LoginRequest, SignupRequest};
use crate::state::AppState;

/// POST /api/auth/signup
///
/// Register a new user. Returns 201 with `{ user, token }`.
pub async fn signup(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<SignupRequest>,
) -> AppResult<impl IntoResponse> {
    let session = state.credentials.signup(input).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

/// POST /api/auth/login
///
/// Exchange email and password for `{ token, user }`.
pub async fn login(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let session = state.credentials.login(input).await?;
    Ok(Json(session))
}
