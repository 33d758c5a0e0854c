use std::any::Any;
use std::collections::BTreeMap;

use crate::domain::error::DomainError;
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

pub(crate) const INTERNAL_ERROR_DETAIL: &str = "Internal server error.";
pub(crate) const MISSING_CREDENTIALS: &str = "Authentication credentials were not provided.";
pub(crate) const INVALID_BEARER: &str = "Given token not valid for any token type";

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("malformed body: {0}")]
    Json(#[from] JsonRejection),

    #[error("not found")]
    NotFound,

    #[error("invalid page")]
    InvalidPage,

    #[error("unauthorized: {0}")]
    Unauthorized(&'static str),

    #[error("request timed out")]
    Timeout,

    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

pub(crate) type AppResult<T> = Result<T, AppError>;

// A path segment that does not parse as an id is a route that does not exist.
impl From<PathRejection> for AppError {
    fn from(_: PathRejection) -> Self {
        AppError::NotFound
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ErrorBody {
    pub(crate) detail: String,
}

type FieldErrors = BTreeMap<String, Vec<String>>;

fn detail(status: StatusCode, msg: impl Into<String>) -> Response {
    (status, Json(ErrorBody { detail: msg.into() })).into_response()
}

fn field_errors(status: StatusCode, errors: FieldErrors) -> Response {
    (status, Json(errors)).into_response()
}

pub(crate) fn internal_error_response() -> Response {
    detail(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_DETAIL)
}

fn validator_field_errors(err: &ValidationErrors) -> FieldErrors {
    err.field_errors()
        .into_iter()
        .map(|(field, errors)| {
            let messages = errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

fn unauthorized(msg: &str) -> Response {
    let mut response = detail(StatusCode::UNAUTHORIZED, msg);
    response
        .headers_mut()
        .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer realm=\"api\""));
    response
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Domain(err) => match err {
                DomainError::Validation { field, message } => field_errors(
                    StatusCode::BAD_REQUEST,
                    FieldErrors::from([(field.to_string(), vec![message.to_string()])]),
                ),
                DomainError::InvalidFields(fields) => {
                    let mut errors = FieldErrors::new();
                    for (field, message) in fields {
                        errors
                            .entry(field.to_string())
                            .or_default()
                            .push(message.to_string());
                    }
                    field_errors(StatusCode::BAD_REQUEST, errors)
                }
                DomainError::NotFound(_) => detail(StatusCode::NOT_FOUND, "Not found."),
                DomainError::AlreadyExists(resource) => detail(
                    StatusCode::CONFLICT,
                    format!("{resource} already exists."),
                ),
                DomainError::InvalidCredentials => {
                    unauthorized("No active account found with the given credentials")
                }
                DomainError::InvalidToken => unauthorized("Token is invalid or expired"),
                DomainError::Unexpected(reason) => {
                    error!(%reason, "unexpected domain error");
                    internal_error_response()
                }
            },
            AppError::Validation(err) => {
                field_errors(StatusCode::BAD_REQUEST, validator_field_errors(&err))
            }
            AppError::Json(rejection) => detail(rejection.status(), rejection.body_text()),
            AppError::NotFound => detail(StatusCode::NOT_FOUND, "Not found."),
            AppError::InvalidPage => detail(StatusCode::NOT_FOUND, "Invalid page."),
            AppError::Unauthorized(msg) => unauthorized(msg),
            AppError::Timeout => detail(StatusCode::REQUEST_TIMEOUT, "Request timed out."),
            AppError::Internal(err) => {
                error!(error = ?err, "unhandled error");
                internal_error_response()
            }
        }
    }
}

/// Responder for `CatchPanicLayer`: the panic is logged, the caller only
/// ever sees the opaque 500 body.
pub(crate) fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let reason = if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else {
        "non-string panic payload"
    };
    error!(%reason, "handler panicked");
    internal_error_response()
}
