//! Handlers for the user collection.
//!
//! These endpoints carry no authorization check.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::user::{CreateUserRequest, UpdateUserRequest, UserResponse};
use crate::api::extract::ApiJson;
use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/users`
pub async fn user_list_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = state.user_service.list_users().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Creates a user without a usable password.
///
/// # Endpoint
///
/// `POST /api/users`
pub async fn create_user_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    payload.validate()?;

    let user = state.user_service.create_user(payload.into()).await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// `GET /api/users/{id}`
pub async fn get_user_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state.user_service.get_user(id).await?;
    Ok(Json(user.into()))
}

/// `PUT|PATCH /api/users/{id}`
pub async fn update_user_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<UpdateUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    payload.validate()?;

    let user = state.user_service.update_user(id, payload.into()).await?;

    Ok(Json(user.into()))
}

/// Deletes a user and, by cascade, their properties.
///
/// # Endpoint
///
/// `DELETE /api/users/{id}`
pub async fn delete_user_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.user_service.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
