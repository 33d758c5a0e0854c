use std::borrow::Cow;

use axum::{
    Json,
    extract::{
        OriginalUri, Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::comments::CommentDto;
use super::not_blank;
use crate::application::blog_service::ListPostsResult;
use crate::domain::post::{CreatePostRequest, Post, PostDetail, PostSummary, TITLE_MAX_CHARS};
use crate::presentation::AppState;
use crate::presentation::http::app_error::{AppError, AppResult};
use crate::presentation::http::middleware::auth::AuthenticatedUser;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct CreatePostDto {
    #[validate(
        required(message = "This field is required."),
        custom(function = "not_blank"),
        custom(function = "title_within_limit")
    )]
    pub(crate) title: Option<String>,
    #[validate(
        required(message = "This field is required."),
        custom(function = "not_blank")
    )]
    pub(crate) content: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub(crate) struct PageQuery {
    /// 1-based page number; an empty value means the first page.
    #[param(value_type = Option<u32>)]
    pub(crate) page: Option<String>,
}

impl PageQuery {
    fn page_number(&self) -> Result<u32, AppError> {
        match self.page.as_deref().map(str::trim) {
            None | Some("") => Ok(1),
            Some(raw) => match raw.parse::<u32>() {
                Ok(page) if page > 0 => Ok(page),
                _ => Err(AppError::InvalidPage),
            },
        }
    }
}

// Surrounding whitespace is trimmed before the title is stored.
fn title_within_limit(value: &str) -> Result<(), ValidationError> {
    if value.trim().chars().count() > TITLE_MAX_CHARS {
        return Err(ValidationError::new("max_length").with_message(Cow::Borrowed(
            "Ensure this field has no more than 255 characters.",
        )));
    }
    Ok(())
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostDto {
    pub(crate) id: Uuid,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostListItemDto {
    pub(crate) id: Uuid,
    pub(crate) title: String,
    pub(crate) comments_count: usize,
    pub(crate) created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostDetailDto {
    pub(crate) id: Uuid,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) comments: Vec<CommentDto>,
    pub(crate) created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostPageDto {
    pub(crate) count: i64,
    pub(crate) next: Option<String>,
    pub(crate) previous: Option<String>,
    pub(crate) results: Vec<PostListItemDto>,
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            created_at: post.created_at,
        }
    }
}

impl From<PostSummary> for PostListItemDto {
    fn from(summary: PostSummary) -> Self {
        let comments_count = summary.comments_count();
        Self {
            id: summary.post.id,
            title: summary.post.title,
            comments_count,
            created_at: summary.post.created_at,
        }
    }
}

impl From<PostDetail> for PostDetailDto {
    fn from(detail: PostDetail) -> Self {
        Self {
            id: detail.post.id,
            title: detail.post.title,
            content: detail.post.content,
            comments: detail.comments.into_iter().map(CommentDto::from).collect(),
            created_at: detail.post.created_at,
        }
    }
}

impl PostPageDto {
    fn from_result(result: ListPostsResult, path: &str) -> Self {
        let next = (result.page < result.last_page()).then(|| page_link(path, result.page + 1));
        let previous = (result.page > 1).then(|| page_link(path, result.page - 1));

        Self {
            count: result.total,
            next,
            previous,
            results: result.posts.into_iter().map(PostListItemDto::from).collect(),
        }
    }
}

// The first page is addressed without a query string.
fn page_link(path: &str, page: u32) -> String {
    if page <= 1 {
        path.to_string()
    } else {
        format!("{path}?page={page}")
    }
}

#[utoipa::path(
    get,
    path = "/v1/api/posts",
    tag = "posts",
    params(PageQuery),
    responses(
        (status = 200, description = "Posts listed, newest first", body = PostPageDto),
        (status = 404, description = "Invalid page"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn list_posts(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> AppResult<(StatusCode, Json<PostPageDto>)> {
    let Query(query) = query.map_err(|_| AppError::InvalidPage)?;
    let page = query.page_number()?;

    let result = state
        .blog_service
        .list_posts(page, state.posts_page_size)
        .await?;
    if result.is_out_of_range() {
        return Err(AppError::InvalidPage);
    }

    Ok((
        StatusCode::OK,
        Json(PostPageDto::from_result(result, uri.path())),
    ))
}

#[utoipa::path(
    get,
    path = "/v1/api/posts/{id}",
    tag = "posts",
    params(
        ("id" = Uuid, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Post with its 10 most recent comments", body = PostDetailDto),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn get_post(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> AppResult<(StatusCode, Json<PostDetailDto>)> {
    let Path(id) = path?;
    let detail = state.blog_service.get_post(id).await?;

    Ok((StatusCode::OK, Json(PostDetailDto::from(detail))))
}

#[utoipa::path(
    post,
    path = "/v1/api/posts",
    tag = "posts",
    security(
        ("bearer_auth" = [])
    ),
    request_body = CreatePostDto,
    responses(
        (status = 201, description = "Post created", body = PostDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn create_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    payload: Result<Json<CreatePostDto>, JsonRejection>,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    let Json(dto) = payload?;
    dto.validate()?;
    let req = CreatePostRequest {
        title: dto.title.unwrap_or_default(),
        content: dto.content.unwrap_or_default(),
    };

    let post = state.blog_service.create_post(req).await?;
    tracing::info!(post_id = %post.id, user_id = auth.user_id, "post created");

    Ok((StatusCode::CREATED, Json(PostDto::from(post))))
}
