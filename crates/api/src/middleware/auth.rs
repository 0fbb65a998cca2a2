//! Bearer-token authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use super::guard::{authenticate, Identity};
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated caller, extracted from the `Authorization: Bearer` header.
///
/// The identity is also stored in the request extensions so later guard
/// stages in the same request read it instead of re-verifying the token.
///
/// ```ignore
/// async fn my_handler(AuthUser(user): AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser(pub Identity);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(identity) = parts.extensions.get::<Identity>() {
            return Ok(AuthUser(identity.clone()));
        }

        let identity = authenticate(&parts.headers, &state.tokens).inspect_err(|err| {
            tracing::debug!(error = %err, path = %parts.uri.path(), "Authentication rejected");
        })?;
        parts.extensions.insert(identity.clone());
        Ok(AuthUser(identity))
    }
}
