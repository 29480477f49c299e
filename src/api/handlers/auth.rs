//! Handlers for registration and login.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::auth::{LoginRequest, RegisterRequest};
use crate::api::dto::user::UserResponse;
use crate::api::extract::ApiJson;
use crate::error::AppError;
use crate::state::AppState;

/// Registers an account.
///
/// # Endpoint
///
/// `POST /api/register`
///
/// # Errors
///
/// Returns 400 if a field is missing, the email is malformed or already
/// registered.
pub async fn register_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let user = state.auth_service.register(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Checks credentials and returns the user.
///
/// # Endpoint
///
/// `POST /api/login`
///
/// # Errors
///
/// Returns 400 if a field is missing.
/// Returns 401 for an unknown email or a wrong password alike.
pub async fn login_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state
        .auth_service
        .login(
            payload.email.as_deref().unwrap_or_default(),
            payload.password.as_deref().unwrap_or_default(),
        )
        .await?;

    Ok(Json(user.into()))
}
