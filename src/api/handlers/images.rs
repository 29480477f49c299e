//! Handlers for the image collection.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::dto::image::{ImageRequest, ImageResponse};
use crate::api::extract::ApiJson;
use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/images`
pub async fn image_list_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<ImageResponse>>, AppError> {
    let images = state.image_service.list_images().await?;
    Ok(Json(images.into_iter().map(ImageResponse::from).collect()))
}

/// Attaches an image to a property.
///
/// # Endpoint
///
/// `POST /api/images`
///
/// # Errors
///
/// Returns 400 if a field is missing, the URL is invalid or the property
/// does not exist.
pub async fn create_image_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<ImageRequest>,
) -> Result<(StatusCode, Json<ImageResponse>), AppError> {
    let new_image = payload.into_new_image()?;
    let image = state.image_service.create_image(new_image).await?;
    Ok((StatusCode::CREATED, Json(image.into())))
}

/// `GET /api/images/{id}`
pub async fn get_image_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<ImageResponse>, AppError> {
    let image = state.image_service.get_image(id).await?;
    Ok(Json(image.into()))
}

/// `PUT|PATCH /api/images/{id}`
pub async fn update_image_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<ImageRequest>,
) -> Result<Json<ImageResponse>, AppError> {
    let patch = payload.into_patch()?;
    let image = state.image_service.update_image(id, patch).await?;
    Ok(Json(image.into()))
}

/// `DELETE /api/images/{id}`
pub async fn delete_image_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.image_service.delete_image(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
