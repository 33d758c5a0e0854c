use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::comment::Comment;
use crate::domain::error::DomainError;

#[derive(Debug, Clone)]
pub(crate) struct NewComment {
    pub(crate) id: Uuid,
    pub(crate) post_id: Uuid,
    pub(crate) author: String,
    pub(crate) body: String,
}

/// Every listing returned here is ordered by `created_at` descending.
#[async_trait]
pub(crate) trait CommentRepository: Send + Sync {
    async fn create_comment(&self, input: NewComment) -> Result<Comment, DomainError>;
    async fn recent_comments(&self, post_id: Uuid, limit: u32)
    -> Result<Vec<Comment>, DomainError>;
    async fn comments_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>, DomainError>;
    /// Prefetch for a page of posts.
    async fn comments_for_posts(&self, post_ids: &[Uuid]) -> Result<Vec<Comment>, DomainError>;
}
