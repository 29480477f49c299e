//! Handler for contact inquiries.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::contact_message::{ContactMessageRequest, ContactMessageResponse};
use crate::api::extract::ApiJson;
use crate::error::AppError;
use crate::state::AppState;

/// Submits an inquiry about a property.
///
/// # Endpoint
///
/// `POST /api/contact-messages`
///
/// # Errors
///
/// Returns 400 with a `property` field error if the property does not exist.
pub async fn create_contact_message_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<ContactMessageRequest>,
) -> Result<(StatusCode, Json<ContactMessageResponse>), AppError> {
    let new_message = payload.into_new_message()?;
    let message = state.contact_service.submit(new_message).await?;
    Ok((StatusCode::CREATED, Json(message.into())))
}
