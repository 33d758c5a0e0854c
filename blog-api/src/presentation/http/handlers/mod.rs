use std::borrow::Cow;

use validator::ValidationError;

pub(crate) mod auth;
pub(crate) mod comments;
pub(crate) mod posts;

/// Whitespace-only strings count as blank.
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank")
            .with_message(Cow::Borrowed("This field may not be blank.")));
    }
    Ok(())
}
