//! Application error type and its HTTP rendering.
//!
//! Every fallible operation in the service, repository and handler layers
//! returns [`AppError`]. Handlers propagate it with `?` and axum turns it into
//! a JSON response via [`IntoResponse`].
//!
//! # Response bodies
//!
//! - Field-level validation failures render as a field-keyed mapping:
//!   `{"title": ["This field is required."]}`
//! - Everything else renders as `{"error": "<message>"}`

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;

/// Error taxonomy shared by all layers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Bad input. `fields` is set for field-level failures and takes over
    /// the response body.
    #[error("{message}")]
    Validation {
        message: String,
        details: Value,
        fields: Option<FieldErrors>,
    },
    #[error("{message}")]
    NotFound { message: String, details: Value },
    #[error("{message}")]
    Unauthorized { message: String, details: Value },
    #[error("{message}")]
    Conflict { message: String, details: Value },
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
            fields: None,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Builds a validation error from per-field messages.
    pub fn fields(errors: FieldErrors) -> Self {
        Self::Validation {
            message: "Invalid input".to_string(),
            details: json!({}),
            fields: Some(errors),
        }
    }

    /// HTTP status conveying the error kind.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } | AppError::Conflict { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Field-keyed details, if this is a field-level validation failure.
    pub fn field_errors(&self) -> Option<Map<String, Value>> {
        match self {
            AppError::Validation {
                fields: Some(fields),
                ..
            } => Some(fields.to_map()),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match self.field_errors() {
            Some(fields) => Value::Object(fields),
            None => json!({ "error": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

/// Accumulates per-field validation messages in a stable order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Returns `Ok(())` when no errors were collected.
    pub fn into_result(self) -> Result<(), AppError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(AppError::fields(self))
        }
    }

    fn to_map(&self) -> Map<String, Value> {
        self.0
            .iter()
            .map(|(field, messages)| (field.clone(), json!(messages)))
            .collect()
    }
}

impl From<validator::ValidationErrors> for FieldErrors {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut out = FieldErrors::new();
        for (field, field_errors) in errors.field_errors() {
            for e in field_errors {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                out.add(field.as_ref(), message);
            }
        }
        out
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::fields(errors.into())
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        map_sqlx_error(e)
    }
}

/// Classifies a database error.
///
/// Unique violations become [`AppError::Conflict`] and foreign-key violations
/// become [`AppError::Validation`]. Anything else is logged and reported as an
/// opaque internal error.
pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if let Some(db) = e.as_database_error() {
        if db.is_unique_violation() {
            return AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": db.constraint() }),
            );
        }
        if db.is_foreign_key_violation() {
            return AppError::bad_request(
                "Referenced record does not exist",
                json!({ "constraint": db.constraint() }),
            );
        }
    }

    tracing::error!(error = ?e, "Database error");
    AppError::internal("Database error", json!({}))
}
