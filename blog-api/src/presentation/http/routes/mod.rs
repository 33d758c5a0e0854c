use axum::Router;

use crate::presentation::AppState;

pub(crate) mod auth;
pub(crate) mod posts;

pub(crate) const API_PREFIX: &str = "/v1/api";

pub(crate) fn router(state: AppState) -> Router<AppState> {
    Router::new().nest(
        API_PREFIX,
        Router::new().merge(auth::router()).merge(posts::router(state)),
    )
}
