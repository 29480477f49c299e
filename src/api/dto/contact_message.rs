//! DTOs for contact messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::fields;
use crate::domain::entities::{ContactMessage, NewContactMessage};
use crate::error::{AppError, FieldErrors};

/// Inquiry submitted for a property.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ContactMessageRequest {
    #[validate(required(message = "This field is required."))]
    pub property: Option<i64>,
    pub name: Option<String>,
    #[validate(
        required(message = "This field is required."),
        email(message = "Enter a valid email address.")
    )]
    pub email: Option<String>,
    pub message: Option<String>,
}

impl ContactMessageRequest {
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] with per-field messages.
    pub fn into_new_message(self) -> Result<NewContactMessage, AppError> {
        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(e) => e.into(),
        };

        let name = fields::text(&mut errors, "name", self.name, true, Some(100));
        let message = fields::text(&mut errors, "message", self.message, true, None);

        errors.into_result()?;

        match (self.property, name, self.email, message) {
            (Some(property_id), Some(name), Some(email), Some(message)) => Ok(NewContactMessage {
                property_id,
                name,
                email,
                message,
            }),
            _ => Err(AppError::bad_request("Invalid input", serde_json::json!({}))),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ContactMessageResponse {
    pub id: i64,
    pub property: i64,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl From<ContactMessage> for ContactMessageResponse {
    fn from(m: ContactMessage) -> Self {
        Self {
            id: m.id,
            property: m.property_id,
            name: m.name,
            email: m.email,
            message: m.message,
            created_at: m.created_at,
        }
    }
}
