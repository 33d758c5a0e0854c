pub(crate) mod comment;
pub(crate) mod error;
pub(crate) mod post;
pub(crate) mod user;

pub(crate) const BLANK_FIELD: &str = "This field may not be blank.";
pub(crate) const REQUIRED_FIELD: &str = "This field is required.";
