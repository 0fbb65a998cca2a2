use crate::types::DbId;

/// Domain-level error taxonomy.
///
/// The HTTP layer maps each variant to exactly one status code; see
/// `internhub_api::error::AppError`.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// Signup with an email that already belongs to a user.
    #[error("User already exists")]
    DuplicateEmail,

    /// Unknown email or wrong password. Deliberately does not say which.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// A string that does not name a variant of one of the closed domain enums.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} must be one of {expected}, got '{value}'")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}

impl From<ParseEnumError> for CoreError {
    fn from(err: ParseEnumError) -> Self {
        CoreError::Validation(err.to_string())
    }
}
