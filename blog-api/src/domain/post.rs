use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::BLANK_FIELD;
use super::comment::Comment;
use super::error::DomainError;

pub(crate) const TITLE_MAX_CHARS: usize = 255;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Post {
    pub(crate) id: Uuid,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CreatePostRequest {
    pub(crate) title: String,
    pub(crate) content: String,
}

impl CreatePostRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            title: normalize_title(&self.title)?,
            content: normalize_content(&self.content)?,
        })
    }
}

/// A post as shown in listings: its comments are prefetched and the
/// listed count is taken from that same collection.
#[derive(Debug, Clone)]
pub(crate) struct PostSummary {
    pub(crate) post: Post,
    pub(crate) comments: Vec<Comment>,
}

impl PostSummary {
    pub(crate) fn comments_count(&self) -> usize {
        self.comments.len()
    }
}

/// A single post with the most recent slice of its comments.
#[derive(Debug, Clone)]
pub(crate) struct PostDetail {
    pub(crate) post: Post,
    pub(crate) comments: Vec<Comment>,
}

impl Post {
    pub(crate) fn new(
        id: Uuid,
        title: impl Into<String>,
        content: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if id.is_nil() {
            return Err(DomainError::Validation {
                field: "id",
                message: "must not be nil",
            });
        }
        let title = normalize_title(&title.into())?;
        let content = normalize_content(&content.into())?;

        Ok(Self {
            id,
            title,
            content,
            created_at,
        })
    }
}

fn normalize_title(title: &str) -> Result<String, DomainError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(DomainError::Validation {
            field: "title",
            message: BLANK_FIELD,
        });
    }
    if title.chars().count() > TITLE_MAX_CHARS {
        return Err(DomainError::Validation {
            field: "title",
            message: "Ensure this field has no more than 255 characters.",
        });
    }
    Ok(title.to_string())
}

fn normalize_content(content: &str) -> Result<String, DomainError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(DomainError::Validation {
            field: "content",
            message: BLANK_FIELD,
        });
    }
    Ok(content.to_string())
}
