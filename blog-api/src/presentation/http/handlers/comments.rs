use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::comment::{Comment, CreateCommentRequest};
use crate::presentation::AppState;
use crate::presentation::http::app_error::AppResult;
use crate::presentation::http::middleware::auth::AuthenticatedUser;

/// Both fields are checked by the service, after the post lookup.
#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct CreateCommentDto {
    /// Defaults to the caller's username when omitted or blank.
    pub(crate) author: Option<String>,
    pub(crate) body: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct CommentDto {
    pub(crate) id: Uuid,
    pub(crate) author: String,
    pub(crate) body: String,
    pub(crate) created_at: DateTime<Utc>,
}

impl From<Comment> for CommentDto {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            author: comment.author,
            body: comment.body,
            created_at: comment.created_at,
        }
    }
}

#[utoipa::path(
    post,
    path = "/v1/api/posts/{id}/comments",
    tag = "comments",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = Uuid, Path, description = "Post id")
    ),
    request_body = CreateCommentDto,
    responses(
        (status = 201, description = "Comment created", body = CommentDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn create_comment(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<CreateCommentDto>, JsonRejection>,
) -> AppResult<(StatusCode, Json<CommentDto>)> {
    let Path(post_id) = path?;
    let Json(dto) = payload?;

    let author = dto
        .author
        .filter(|author| !author.trim().is_empty())
        .unwrap_or(auth.username);
    let req = CreateCommentRequest {
        author,
        body: dto.body,
    };

    let comment = state.blog_service.create_comment(post_id, req).await?;
    tracing::info!(%post_id, comment_id = %comment.id, "comment created");

    Ok((StatusCode::CREATED, Json(CommentDto::from(comment))))
}

/// Unknown posts list as empty rather than 404, unlike comment creation.
#[utoipa::path(
    get,
    path = "/v1/api/posts/{id}/comments",
    tag = "comments",
    params(
        ("id" = Uuid, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "All comments of the post, newest first", body = [CommentDto]),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn list_comments(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> AppResult<(StatusCode, Json<Vec<CommentDto>>)> {
    let Path(post_id) = path?;
    let comments = state.blog_service.list_comments(post_id).await?;

    Ok((
        StatusCode::OK,
        Json(comments.into_iter().map(CommentDto::from).collect()),
    ))
}
