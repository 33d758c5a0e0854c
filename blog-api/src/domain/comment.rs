use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{BLANK_FIELD, REQUIRED_FIELD};
use super::error::DomainError;

pub(crate) const AUTHOR_MAX_CHARS: usize = 100;

/// How many comments a post detail carries.
pub(crate) const RECENT_COMMENTS_LIMIT: u32 = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Comment {
    pub(crate) id: Uuid,
    pub(crate) post_id: Uuid,
    pub(crate) author: String,
    pub(crate) body: String,
    pub(crate) created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CreateCommentRequest {
    pub(crate) author: String,
    pub(crate) body: Option<String>,
}

#[derive(Debug, Clone)]
pub(crate) struct ValidComment {
    pub(crate) author: String,
    pub(crate) body: String,
}

impl CreateCommentRequest {
    /// Both fields are checked even when the first one fails.
    pub(crate) fn validate(self) -> Result<ValidComment, DomainError> {
        let author = normalize_author(&self.author);
        let body = normalize_body(self.body.as_deref());

        match (author, body) {
            (Ok(author), Ok(body)) => Ok(ValidComment { author, body }),
            (
                Err(DomainError::Validation {
                    field: author_field,
                    message: author_message,
                }),
                Err(DomainError::Validation {
                    field: body_field,
                    message: body_message,
                }),
            ) => Err(DomainError::InvalidFields(vec![
                (author_field, author_message),
                (body_field, body_message),
            ])),
            (Err(err), _) | (_, Err(err)) => Err(err),
        }
    }
}

impl Comment {
    pub(crate) fn new(
        id: Uuid,
        post_id: Uuid,
        author: impl Into<String>,
        body: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if post_id.is_nil() {
            return Err(DomainError::Validation {
                field: "post",
                message: "must not be nil",
            });
        }
        let author = normalize_author(&author.into())?;
        let body: String = body.into();
        let body = normalize_body(Some(body.as_str()))?;

        Ok(Self {
            id,
            post_id,
            author,
            body,
            created_at,
        })
    }
}

// Authors may be empty; only the length is bounded.
fn normalize_author(author: &str) -> Result<String, DomainError> {
    let author = author.trim();
    if author.chars().count() > AUTHOR_MAX_CHARS {
        return Err(DomainError::Validation {
            field: "author",
            message: "Ensure this field has no more than 100 characters.",
        });
    }
    Ok(author.to_string())
}

fn normalize_body(body: Option<&str>) -> Result<String, DomainError> {
    let Some(body) = body else {
        return Err(DomainError::Validation {
            field: "body",
            message: REQUIRED_FIELD,
        });
    };
    let body = body.trim();
    if body.is_empty() {
        return Err(DomainError::Validation {
            field: "body",
            message: BLANK_FIELD,
        });
    }
    Ok(body.to_string())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::{Comment, CreateCommentRequest, DomainError};

    #[test]
    fn create_comment_request_rejects_blank_body() {
        let req = CreateCommentRequest {
            author: "reader".to_string(),
            body: Some(" \n ".to_string()),
        };

        match req.validate().expect_err("body must be rejected") {
            DomainError::Validation { field, .. } => assert_eq!(field, "body"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn create_comment_request_rejects_long_author() {
        let req = CreateCommentRequest {
            author: "a".repeat(101),
            body: Some("body".to_string()),
        };

        match req.validate().expect_err("author must be rejected") {
            DomainError::Validation { field, .. } => assert_eq!(field, "author"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn create_comment_request_requires_body() {
        let req = CreateCommentRequest {
            author: String::new(),
            body: None,
        };

        match req.validate().expect_err("missing body must be rejected") {
            DomainError::Validation { field, message } => {
                assert_eq!(field, "body");
                assert_eq!(message, "This field is required.");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn create_comment_request_reports_author_and_body_together() {
        let req = CreateCommentRequest {
            author: "a".repeat(101),
            body: None,
        };

        match req.validate().expect_err("both fields must be rejected") {
            DomainError::InvalidFields(fields) => {
                let names: Vec<_> = fields.iter().map(|(field, _)| *field).collect();
                assert_eq!(names, vec!["author", "body"]);
            }
            other => panic!("expected every failing field, got {other:?}"),
        }
    }

    #[test]
    fn comment_new_trims_fields() {
        let comment = Comment::new(Uuid::new_v4(), Uuid::new_v4(), "  ann ", " hi ", Utc::now())
            .expect("comment should be created");
        assert_eq!(comment.author, "ann");
        assert_eq!(comment.body, "hi");
    }

    #[test]
    fn comment_new_requires_owning_post() {
        let err = Comment::new(Uuid::new_v4(), Uuid::nil(), "ann", "hi", Utc::now())
            .expect_err("orphan comment must be rejected");
        assert!(matches!(err, DomainError::Validation { field: "post", .. }));
    }
}
