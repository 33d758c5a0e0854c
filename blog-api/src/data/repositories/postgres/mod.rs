pub(crate) mod comment_repository;
pub(crate) mod post_repository;
pub(crate) mod user_repository;

use crate::domain::error::DomainError;

/// Maps a foreign-key violation to `NotFound(resource)`; everything else
/// is unexpected.
pub(crate) fn map_fk_violation(err: sqlx::Error, resource: &str) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23503") => {
            DomainError::NotFound(resource.to_string())
        }
        _ => DomainError::Unexpected(err.to_string()),
    }
}
