use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use crate::data::comment_repository::{CommentRepository, NewComment};
use crate::data::post_repository::{NewPost, Pagination, PostRepository};
use crate::domain::comment::{Comment, CreateCommentRequest, RECENT_COMMENTS_LIMIT};
use crate::domain::error::DomainError;
use crate::domain::post::{CreatePostRequest, Post, PostDetail, PostSummary};

#[derive(Debug, Clone)]
pub(crate) struct ListPostsResult {
    pub(crate) posts: Vec<PostSummary>,
    pub(crate) page: u32,
    pub(crate) page_size: u32,
    pub(crate) total: i64,
}

impl ListPostsResult {
    /// Pages are 1-based; an empty store still has page 1.
    pub(crate) fn last_page(&self) -> u32 {
        let page_size = i64::from(self.page_size.max(1));
        let pages = (self.total + page_size - 1) / page_size;
        u32::try_from(pages.max(1)).unwrap_or(u32::MAX)
    }

    pub(crate) fn is_out_of_range(&self) -> bool {
        self.page > self.last_page()
    }
}

pub(crate) struct BlogService {
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
}

impl BlogService {
    pub(crate) fn new(posts: Arc<dyn PostRepository>, comments: Arc<dyn CommentRepository>) -> Self {
        Self { posts, comments }
    }

    pub(crate) async fn create_post(&self, req: CreatePostRequest) -> Result<Post, DomainError> {
        let req = req.validate()?;

        let new_post = NewPost {
            id: Uuid::new_v4(),
            title: req.title,
            content: req.content,
        };
        self.posts.create_post(new_post).await
    }

    pub(crate) async fn get_post(&self, id: Uuid) -> Result<PostDetail, DomainError> {
        let post = self.find_post(id).await?;
        let comments = self
            .comments
            .recent_comments(id, RECENT_COMMENTS_LIMIT)
            .await?;

        Ok(PostDetail { post, comments })
    }

    pub(crate) async fn list_posts(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<ListPostsResult, DomainError> {
        let pagination = Pagination { page, page_size };
        let posts = self.posts.list_posts(pagination).await?;
        let total = self.posts.total_posts().await?;

        let ids: Vec<Uuid> = posts.iter().map(|post| post.id).collect();
        let mut by_post: HashMap<Uuid, Vec<Comment>> = HashMap::new();
        for comment in self.comments.comments_for_posts(&ids).await? {
            by_post.entry(comment.post_id).or_default().push(comment);
        }

        let posts = posts
            .into_iter()
            .map(|post| {
                let comments = by_post.remove(&post.id).unwrap_or_default();
                PostSummary { post, comments }
            })
            .collect();

        Ok(ListPostsResult {
            posts,
            page,
            page_size,
            total,
        })
    }

    /// The post must exist before the body is even looked at.
    pub(crate) async fn create_comment(
        &self,
        post_id: Uuid,
        req: CreateCommentRequest,
    ) -> Result<Comment, DomainError> {
        self.find_post(post_id).await?;
        let req = req.validate()?;

        let new_comment = NewComment {
            id: Uuid::new_v4(),
            post_id,
            author: req.author,
            body: req.body,
        };
        self.comments.create_comment(new_comment).await
    }

    /// No existence check: an unknown post simply has no comments.
    pub(crate) async fn list_comments(&self, post_id: Uuid) -> Result<Vec<Comment>, DomainError> {
        self.comments.comments_for_post(post_id).await
    }

    async fn find_post(&self, id: Uuid) -> Result<Post, DomainError> {
        self.posts
            .get_post(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("post id: {id}")))
    }
}
