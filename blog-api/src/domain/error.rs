use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum DomainError {
    #[error("validation failed for '{field}': {message}")]
    Validation {
        field: &'static str,
        message: &'static str,
    },

    /// Several fields failed at once; one message per field.
    #[error("validation failed for {count} fields", count = .0.len())]
    InvalidFields(Vec<(&'static str, &'static str)>),

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("resource already exists: {0}")]
    AlreadyExists(String),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("token is invalid or expired")]
    InvalidToken,

    #[error("unexpected domain error: {0}")]
    Unexpected(String),
}
