use axum::{Json, Router, routing::get};
use serde::Serialize;
use tower_http::catch_panic::CatchPanicLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::AppState;
use app_error::{AppError, panic_response};
use openapi::ApiDoc;

pub(crate) mod app_error;
pub(crate) mod handlers;
pub(crate) mod middleware;
pub(crate) mod openapi;
pub(crate) mod routes;


/// Every route, the docs, the 404 fallback and the panic normalizer.
/// Transport guards (trace, CORS, limits) are added by the server.
pub(crate) fn app(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .merge(routes::router(state.clone()))
        .with_state(state)
        .merge(
            SwaggerUi::new(format!("{}/swagger", routes::API_PREFIX))
                .url(format!("{}/schema", routes::API_PREFIX), ApiDoc::openapi()),
        )
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(panic_response))
}

#[derive(Debug, Serialize)]
struct HealthzResponse {
    status: &'static str,
}

async fn health_handler() -> Json<HealthzResponse> {
    Json(HealthzResponse { status: "ok" })
}

async fn not_found() -> AppError {
    AppError::NotFound
}
