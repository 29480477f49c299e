//! Handlers for amenity features.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::feature::{FeatureRequest, FeatureResponse};
use crate::api::extract::ApiJson;
use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/features`
pub async fn feature_list_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<FeatureResponse>>, AppError> {
    let features = state.feature_service.list_features().await?;
    Ok(Json(features.into_iter().map(FeatureResponse::from).collect()))
}

/// Looks up or creates a feature by name.
///
/// # Endpoint
///
/// `POST /api/features`
///
/// Answers 201 with the existing row when the name is already known.
pub async fn create_feature_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<FeatureRequest>,
) -> Result<(StatusCode, Json<FeatureResponse>), AppError> {
    payload.validate()?;

    let name = payload.name.unwrap_or_default();
    let feature = state.feature_service.get_or_create(&name).await?;

    Ok((StatusCode::CREATED, Json(feature.into())))
}

/// `GET /api/features/{id}`
pub async fn get_feature_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<FeatureResponse>, AppError> {
    let feature = state.feature_service.get_feature(id).await?;
    Ok(Json(feature.into()))
}

/// Renames a feature.
///
/// # Endpoint
///
/// `PUT|PATCH /api/features/{id}`
///
/// # Errors
///
/// Returns 400 if another feature already has the name.
/// Returns 404 if the feature does not exist.
pub async fn update_feature_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<FeatureRequest>,
) -> Result<Json<FeatureResponse>, AppError> {
    payload.validate()?;

    let name = payload.name.unwrap_or_default();
    let feature = state.feature_service.rename_feature(id, &name).await?;

    Ok(Json(feature.into()))
}

/// `DELETE /api/features/{id}`
pub async fn delete_feature_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.feature_service.delete_feature(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
