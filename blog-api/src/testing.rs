//! In-memory repositories shared by service and router tests.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

use crate::data::comment_repository::{CommentRepository, NewComment};
use crate::data::post_repository::{NewPost, Pagination, PostRepository};
use crate::data::user_repository::{NewUser, UserCredentials, UserRepository};
use crate::domain::comment::Comment;
use crate::domain::error::DomainError;
use crate::domain::post::Post;
use crate::domain::user::User;

#[derive(Default)]
struct StoreState {
    posts: Vec<Post>,
    comments: Vec<Comment>,
    users: Vec<UserCredentials>,
    ticks: i64,
    failing_writes: bool,
    panicking_writes: bool,
}

impl StoreState {
    // strictly increasing timestamps keep recency ordering deterministic
    fn next_timestamp(&mut self) -> DateTime<Utc> {
        self.ticks += 1;
        Utc.timestamp_opt(1_700_000_000, 0).unwrap() + Duration::seconds(self.ticks)
    }

    fn fail_if_requested(&self) -> Result<(), DomainError> {
        if self.panicking_writes {
            panic!("store invariant broken");
        }
        if self.failing_writes {
            return Err(DomainError::Unexpected("connection reset by peer".to_string()));
        }
        Ok(())
    }
}

#[derive(Clone, Default)]
pub(crate) struct InMemoryStore {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryStore {
    fn state(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().expect("store mutex poisoned")
    }

    /// Makes every subsequent write fail like a dropped connection.
    pub(crate) fn fail_writes(&self) {
        self.state().failing_writes = true;
    }

    /// Makes every subsequent write panic inside the handler.
    pub(crate) fn panic_on_writes(&self) {
        self.state().panicking_writes = true;
    }

    pub(crate) fn insert_post(&self, title: &str, content: &str) -> Post {
        let mut state = self.state();
        let created_at = state.next_timestamp();
        let post = Post::new(Uuid::new_v4(), title, content, created_at)
            .expect("fixture post must be valid");
        state.posts.push(post.clone());
        post
    }

    pub(crate) fn insert_comment(&self, post_id: Uuid, body: &str) -> Comment {
        let mut state = self.state();
        let created_at = state.next_timestamp();
        let comment = Comment::new(Uuid::new_v4(), post_id, "reader", body, created_at)
            .expect("fixture comment must be valid");
        state.comments.push(comment.clone());
        comment
    }

    pub(crate) fn post_count(&self) -> usize {
        self.state().posts.len()
    }

    pub(crate) fn comment_count(&self) -> usize {
        self.state().comments.len()
    }

    pub(crate) fn user_credentials(&self, username: &str) -> Option<UserCredentials> {
        self.state()
            .users
            .iter()
            .find(|creds| creds.user.username == username)
            .cloned()
    }
}

fn newest_first<T>(items: &mut [T], key: impl Fn(&T) -> (DateTime<Utc>, Uuid)) {
    items.sort_by(|a, b| key(b).cmp(&key(a)));
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError> {
        let mut state = self.state();
        state.fail_if_requested()?;
        let created_at = state.next_timestamp();
        let post = Post::new(input.id, input.title, input.content, created_at)?;
        state.posts.push(post.clone());
        Ok(post)
    }

    async fn get_post(&self, id: Uuid) -> Result<Option<Post>, DomainError> {
        Ok(self.state().posts.iter().find(|post| post.id == id).cloned())
    }

    async fn list_posts(&self, pagination: Pagination) -> Result<Vec<Post>, DomainError> {
        let mut posts = self.state().posts.clone();
        newest_first(&mut posts, |post| (post.created_at, post.id));
        let offset = usize::try_from(pagination.offset()).unwrap_or(usize::MAX);
        Ok(posts
            .into_iter()
            .skip(offset)
            .take(pagination.page_size as usize)
            .collect())
    }

    async fn total_posts(&self) -> Result<i64, DomainError> {
        Ok(self.state().posts.len() as i64)
    }
}

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn create_comment(&self, input: NewComment) -> Result<Comment, DomainError> {
        let mut state = self.state();
        state.fail_if_requested()?;
        if !state.posts.iter().any(|post| post.id == input.post_id) {
            return Err(DomainError::NotFound(format!("post id: {}", input.post_id)));
        }
        let created_at = state.next_timestamp();
        let comment = Comment::new(input.id, input.post_id, input.author, input.body, created_at)?;
        state.comments.push(comment.clone());
        Ok(comment)
    }

    async fn recent_comments(
        &self,
        post_id: Uuid,
        limit: u32,
    ) -> Result<Vec<Comment>, DomainError> {
        let mut comments = self.comments_for_post(post_id).await?;
        comments.truncate(limit as usize);
        Ok(comments)
    }

    async fn comments_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>, DomainError> {
        self.comments_for_posts(&[post_id]).await
    }

    async fn comments_for_posts(&self, post_ids: &[Uuid]) -> Result<Vec<Comment>, DomainError> {
        let mut comments: Vec<Comment> = self
            .state()
            .comments
            .iter()
            .filter(|comment| post_ids.contains(&comment.post_id))
            .cloned()
            .collect();
        newest_first(&mut comments, |comment| (comment.created_at, comment.id));
        Ok(comments)
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create_user(&self, input: NewUser) -> Result<User, DomainError> {
        let mut state = self.state();
        state.fail_if_requested()?;
        if state.users.iter().any(|c| c.user.username == input.username) {
            return Err(DomainError::AlreadyExists("username".to_string()));
        }
        let created_at = state.next_timestamp();
        let user = User::new(
            state.users.len() as i64 + 1,
            input.username,
            input.email,
            created_at,
        )?;
        state.users.push(UserCredentials {
            user: user.clone(),
            password_hash: input.password_hash,
        });
        Ok(user)
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserCredentials>, DomainError> {
        Ok(self.user_credentials(username))
    }
}
