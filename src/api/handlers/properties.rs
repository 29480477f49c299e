//! Handlers for property listing endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::api::dto::property::{PropertyListQuery, PropertyPayload, PropertyResponse};
use crate::api::extract::ApiJson;
use crate::error::AppError;
use crate::state::AppState;

/// Lists properties with their owner, features and images, newest first.
///
/// # Endpoint
///
/// `GET /api/properties?owner=&city=&type=&min_price=&max_price=`
///
/// Empty query values are ignored.
///
/// # Errors
///
/// Returns 400 if a filter value is malformed.
pub async fn property_list_handler(
    State(state): State<AppState>,
    Query(query): Query<PropertyListQuery>,
) -> Result<Json<Vec<PropertyResponse>>, AppError> {
    let filter = query.into_filter()?;

    let properties = state.property_service.list_properties(filter).await?;

    Ok(Json(
        properties.into_iter().map(PropertyResponse::from).collect(),
    ))
}

/// Creates a property.
///
/// # Endpoint
///
/// `POST /api/properties`
///
/// The owner is resolved before the other fields are validated, so an
/// unknown owner is reported as 404 even if the rest of the payload is
/// invalid.
///
/// # Errors
///
/// Returns 400 if `owner` is missing or a field is invalid.
/// Returns 404 if the owner does not exist.
pub async fn create_property_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<PropertyPayload>,
) -> Result<(StatusCode, Json<PropertyResponse>), AppError> {
    let owner_id = payload.owner_id()?;
    let owner = state.property_service.resolve_owner(owner_id).await?;

    let new_property = payload.into_new_property(owner.id)?;
    let created = state.property_service.create_property(new_property).await?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Returns one property.
///
/// # Endpoint
///
/// `GET /api/properties/{id}`
pub async fn get_property_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<PropertyResponse>, AppError> {
    let property = state.property_service.get_property(id).await?;
    Ok(Json(property.into()))
}

/// Partially updates a property.
///
/// # Endpoint
///
/// `PUT|PATCH /api/properties/{id}`
///
/// Absent fields keep their values and `owner` is ignored. A `features`
/// list replaces all associations; a non-empty `images` list replaces all
/// images.
///
/// # Errors
///
/// Returns 400 if a provided field is invalid.
/// Returns 404 if the property does not exist.
pub async fn update_property_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<PropertyPayload>,
) -> Result<Json<PropertyResponse>, AppError> {
    let patch = payload.into_patch()?;
    let updated = state.property_service.update_property(id, patch).await?;
    Ok(Json(updated.into()))
}

/// Deletes a property with its images and contact messages.
///
/// # Endpoint
///
/// `DELETE /api/properties/{id}`
pub async fn delete_property_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.property_service.delete_property(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
