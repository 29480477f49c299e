//! Repository trait for contact messages.

use crate::domain::entities::{ContactMessage, NewContactMessage};
use crate::error::AppError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactMessageRepository: Send + Sync {
    /// Stores an inquiry about a property.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the property does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_message: NewContactMessage) -> Result<ContactMessage, AppError>;

    /// Lists the messages received for a property, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_for_property(&self, property_id: i64) -> Result<Vec<ContactMessage>, AppError>;
}
