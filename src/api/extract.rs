//! Request extractors that reject with [`AppError`].

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde_json::json;

use crate::error::AppError;

/// JSON body extractor whose rejection renders as `{"error": "..."}` (400).
///
/// Wraps [`axum::Json`] so malformed bodies, wrong content types and type
/// mismatches surface through the same error shape as every other failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(AppError::bad_request(
                rejection.body_text(),
                json!({"status": rejection.status().as_u16()}),
            )),
        }
    }
}
