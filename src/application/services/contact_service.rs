//! Contact inquiries about properties.

use std::sync::Arc;
use tracing::info;

use crate::domain::entities::{ContactMessage, NewContactMessage};
use crate::domain::repositories::{ContactMessageRepository, PropertyRepository};
use crate::error::{AppError, FieldErrors};
use serde_json::json;

/// Service for submitting and reading contact messages.
pub struct ContactService<C: ContactMessageRepository, P: PropertyRepository> {
    messages: Arc<C>,
    properties: Arc<P>,
}

impl<C: ContactMessageRepository, P: PropertyRepository> ContactService<C, P> {
    pub fn new(messages: Arc<C>, properties: Arc<P>) -> Self {
        Self {
            messages,
            properties,
        }
    }

    /// Stores an inquiry.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] with a `property` field error if the
    /// property does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn submit(&self, new_message: NewContactMessage) -> Result<ContactMessage, AppError> {
        if !self.properties.exists(new_message.property_id).await? {
            let mut errors = FieldErrors::new();
            errors.add(
                "property",
                format!(
                    "Invalid pk \"{}\" - object does not exist.",
                    new_message.property_id
                ),
            );
            return Err(AppError::fields(errors));
        }

        let message = self.messages.create(new_message).await?;

        info!(
            message_id = message.id,
            property_id = message.property_id,
            "Contact message received"
        );

        Ok(message)
    }

    /// Lists the inquiries for a property, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the property does not exist.
    pub async fn messages_for_property(
        &self,
        property_id: i64,
    ) -> Result<Vec<ContactMessage>, AppError> {
        if !self.properties.exists(property_id).await? {
            return Err(AppError::not_found(
                "Property not found",
                json!({"id": property_id}),
            ));
        }

        self.messages.list_for_property(property_id).await
    }
}
