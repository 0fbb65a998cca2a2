//! Role-based access control (RBAC) extractors.
//!
//! Each extractor runs [`AuthUser`] first and then the `authorize` stage, so
//! the guard order is fixed by the type.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use super::auth::AuthUser;
use super::guard::{authorize, Identity, ADMIN_ONLY};
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(admin): RequireAdmin) -> AppResult<Json<()>> {
///     // admin is guaranteed to hold the admin role here
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub Identity);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(identity) = AuthUser::from_request_parts(parts, state).await?;
        authorize(parts.extensions.get::<Identity>(), ADMIN_ONLY).inspect_err(|_| {
            tracing::info!(
                user_id = identity.user_id,
                role = %identity.role,
                path = %parts.uri.path(),
                "Admin role required",
            );
        })?;
        Ok(RequireAdmin(identity))
    }
}
