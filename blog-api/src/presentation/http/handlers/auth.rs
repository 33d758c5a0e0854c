use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::not_blank;
use crate::domain::user::TokenRequest;
use crate::presentation::AppState;
use crate::presentation::http::app_error::AppResult;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct TokenObtainDto {
    #[validate(
        required(message = "This field is required."),
        custom(function = "not_blank")
    )]
    pub(crate) username: Option<String>,
    #[validate(
        required(message = "This field is required."),
        custom(function = "not_blank")
    )]
    pub(crate) password: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct TokenRefreshDto {
    #[validate(
        required(message = "This field is required."),
        custom(function = "not_blank")
    )]
    pub(crate) refresh: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct TokenPairDto {
    pub(crate) refresh: String,
    pub(crate) access: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct AccessTokenDto {
    pub(crate) access: String,
}

#[utoipa::path(
    post,
    path = "/v1/api/token",
    tag = "auth",
    request_body = TokenObtainDto,
    responses(
        (status = 200, description = "Access and refresh tokens issued", body = TokenPairDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn obtain_token(
    State(state): State<AppState>,
    payload: Result<Json<TokenObtainDto>, JsonRejection>,
) -> AppResult<(StatusCode, Json<TokenPairDto>)> {
    let Json(dto) = payload?;
    dto.validate()?;

    let req = TokenRequest {
        username: dto.username.unwrap_or_default(),
        password: dto.password.unwrap_or_default(),
    };
    let pair = state.auth_service.obtain_token_pair(req).await?;

    Ok((
        StatusCode::OK,
        Json(TokenPairDto {
            refresh: pair.refresh,
            access: pair.access,
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/v1/api/token/refresh",
    tag = "auth",
    request_body = TokenRefreshDto,
    responses(
        (status = 200, description = "New access token", body = AccessTokenDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Refresh token invalid or expired"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn refresh_token(
    State(state): State<AppState>,
    payload: Result<Json<TokenRefreshDto>, JsonRejection>,
) -> AppResult<(StatusCode, Json<AccessTokenDto>)> {
    let Json(dto) = payload?;
    dto.validate()?;

    let refresh = dto.refresh.unwrap_or_default();
    let access = state.auth_service.refresh_access_token(refresh.trim())?;

    Ok((StatusCode::OK, Json(AccessTokenDto { access })))
}
