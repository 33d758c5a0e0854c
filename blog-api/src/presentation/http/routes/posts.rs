use axum::Router;
use axum::middleware;
use axum::routing::{get, post};

use crate::presentation::AppState;
use crate::presentation::http::handlers::comments::{create_comment, list_comments};
use crate::presentation::http::handlers::posts::{create_post, get_post, list_posts};
use crate::presentation::http::middleware::auth::jwt_auth_middleware;

pub(crate) fn router(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/posts", get(list_posts))
        .route("/posts/{id}", get(get_post))
        .route("/posts/{id}/comments", get(list_comments))
        .route("/posts/{id}/comments/", get(list_comments));

    let protected = Router::new()
        .route("/posts", post(create_post))
        .route("/posts/{id}/comments", post(create_comment))
        .layer(middleware::from_fn_with_state(state, jwt_auth_middleware));

    public.merge(protected)
}
