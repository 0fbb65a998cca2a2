//! Guard stages for protected routes.
//!
//! Each stage is a pure function of the request headers (or the identity a
//! previous stage produced) that either continues with an enriched value or
//! short-circuits with a [`GateError`]. Stages never touch business state.
//! Protected routes always run them in order: [`authenticate`], then
//! [`authorize`].

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use internhub_core::error::CoreError;
use internhub_core::roles::Role;
use internhub_core::types::DbId;

use crate::auth::jwt::{TokenError, TokenIssuer};
use crate::error::AppError;

const BEARER_PREFIX: &str = "Bearer ";

/// Roles allowed to mutate internship postings.
pub const ADMIN_ONLY: &[Role] = &[Role::Admin];

/// Who is making the request, as established by a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: DbId,
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GateError {
    /// No credential, or not in the `Bearer` scheme.
    #[error("Authentication required")]
    Unauthenticated,

    /// A bearer credential that failed verification.
    #[error("Invalid or expired token")]
    InvalidToken(TokenError),

    #[error("Insufficient permissions")]
    Forbidden,
}

impl From<GateError> for AppError {
    fn from(err: GateError) -> Self {
        let message = err.to_string();
        match err {
            GateError::Unauthenticated | GateError::InvalidToken(_) => {
                AppError::Core(CoreError::Unauthorized(message))
            }
            GateError::Forbidden => AppError::Core(CoreError::Forbidden(message)),
        }
    }
}

/// Stage 1: verify the bearer token and produce the caller's identity.
pub fn authenticate(headers: &HeaderMap, tokens: &TokenIssuer) -> Result<Identity, GateError> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix(BEARER_PREFIX))
        .ok_or(GateError::Unauthenticated)?;

    let claims = tokens.verify(token.trim()).map_err(GateError::InvalidToken)?;

    Ok(Identity {
        user_id: claims.sub,
        email: claims.email,
        role: claims.role,
    })
}

/// Stage 2: pass only identities whose role is in `allowed`.
pub fn authorize(identity: Option<&Identity>, allowed: &[Role]) -> Result<(), GateError> {
    let identity = identity.ok_or(GateError::Unauthenticated)?;
    if allowed.contains(&identity.role) {
        Ok(())
    } else {
        Err(GateError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::JwtConfig;
    use assert_matches::assert_matches;
    use axum::http::HeaderValue;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(&JwtConfig {
            secret: "guard-test-secret".to_string(),
            expiry_hours: 24,
        })
    }

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    fn identity(role: Role) -> Identity {
        Identity {
            user_id: 1,
            email: "someone@x.com".to_string(),
            role,
        }
    }

    #[test]
    fn missing_header_is_unauthenticated() {
        assert_eq!(
            authenticate(&HeaderMap::new(), &issuer()),
            Err(GateError::Unauthenticated)
        );
    }

    #[test]
    fn wrong_scheme_is_unauthenticated() {
        let tokens = issuer();
        let token = tokens.issue(1, "a@x.com", Role::Admin).unwrap();
        let headers = headers_with(&format!("Basic {token}"));

        assert_eq!(authenticate(&headers, &tokens), Err(GateError::Unauthenticated));
    }

    #[test]
    fn bad_token_is_invalid() {
        let headers = headers_with("Bearer not-a-token");
        assert_matches!(
            authenticate(&headers, &issuer()),
            Err(GateError::InvalidToken(TokenError::Malformed))
        );
    }

    #[test]
    fn expired_token_is_invalid() {
        let tokens = issuer();
        let old = chrono::Utc::now().timestamp() - 48 * 3600;
        let token = tokens.issue_at(1, "a@x.com", Role::Admin, old).unwrap();
        let headers = headers_with(&format!("Bearer {token}"));

        assert_eq!(
            authenticate(&headers, &tokens),
            Err(GateError::InvalidToken(TokenError::Expired))
        );
    }

    #[test]
    fn valid_token_yields_identity_from_claims() {
        let tokens = issuer();
        let token = tokens.issue(9, "boss@x.com", Role::Admin).unwrap();
        let headers = headers_with(&format!("Bearer {token}"));

        let identity = authenticate(&headers, &tokens).unwrap();
        assert_eq!(identity.user_id, 9);
        assert_eq!(identity.email, "boss@x.com");
        assert_eq!(identity.role, Role::Admin);
    }

    #[test]
    fn authorize_without_identity_is_unauthenticated() {
        assert_eq!(authorize(None, ADMIN_ONLY), Err(GateError::Unauthenticated));
    }

    #[test]
    fn authorize_checks_role_membership() {
        assert_eq!(authorize(Some(&identity(Role::Admin)), ADMIN_ONLY), Ok(()));
        assert_eq!(
            authorize(Some(&identity(Role::Employee)), ADMIN_ONLY),
            Err(GateError::Forbidden)
        );
        assert_eq!(
            authorize(Some(&identity(Role::Intern)), ADMIN_ONLY),
            Err(GateError::Forbidden)
        );
        assert_eq!(
            authorize(Some(&identity(Role::Intern)), &Role::ALL),
            Ok(())
        );
    }

    #[test]
    fn gate_errors_map_to_401_and_403() {
        assert_matches!(
            AppError::from(GateError::InvalidToken(TokenError::Expired)),
            AppError::Core(CoreError::Unauthorized(msg)) if msg == "Invalid or expired token"
        );
        assert_matches!(
            AppError::from(GateError::Forbidden),
            AppError::Core(CoreError::Forbidden(_))
        );
    }
}
