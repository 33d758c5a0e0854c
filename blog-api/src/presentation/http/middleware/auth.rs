use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};

use crate::infrastructure::jwt::TokenType;
use crate::presentation::AppState;
use crate::presentation::http::app_error::{AppError, INVALID_BEARER, MISSING_CREDENTIALS};

#[derive(Debug, Clone)]
pub(crate) struct AuthenticatedUser {
    pub(crate) user_id: i64,
    pub(crate) username: String,
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AppError::Unauthorized(MISSING_CREDENTIALS))
    }
}

/// Gate for write routes: runs before the handler and rejects requests
/// without a valid, unexpired access token.
pub(crate) async fn jwt_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(request.headers())?;

    let claims = state
        .jwt
        .verify_token(token, TokenType::Access)
        .map_err(|err| {
            tracing::debug!(error = %err, "bearer token rejected");
            AppError::Unauthorized(INVALID_BEARER)
        })?;

    request.extensions_mut().insert(AuthenticatedUser {
        user_id: claims.user_id,
        username: claims.username,
    });

    Ok(next.run(request).await)
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .ok_or(AppError::Unauthorized(MISSING_CREDENTIALS))?
        .to_str()
        .map_err(|_| AppError::Unauthorized(INVALID_BEARER))?;

    let mut parts = auth_header.split_whitespace();
    let scheme = parts.next().ok_or(AppError::Unauthorized(MISSING_CREDENTIALS))?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AppError::Unauthorized(MISSING_CREDENTIALS));
    }
    let token = parts.next().ok_or(AppError::Unauthorized(INVALID_BEARER))?;
    if parts.next().is_some() {
        return Err(AppError::Unauthorized(INVALID_BEARER));
    }

    Ok(token)
}
