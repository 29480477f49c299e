//! Repository trait for property images.

use crate::domain::entities::{NewPropertyImage, PropertyImage, PropertyImagePatch};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing property images individually.
///
/// Bulk replacement of a property's images goes through
/// [`super::PropertyRepository::update`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageRepository: Send + Sync {
    /// Attaches an image to a property.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the property does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_image: NewPropertyImage) -> Result<PropertyImage, AppError>;

    /// Finds an image by ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<PropertyImage>, AppError>;

    /// Lists all images ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self) -> Result<Vec<PropertyImage>, AppError>;

    /// Partially updates an image.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the image does not exist.
    /// Returns [`AppError::Validation`] if the new property does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn update(&self, id: i64, patch: PropertyImagePatch) -> Result<PropertyImage, AppError>;

    /// Deletes an image. Returns `Ok(false)` if no such image exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
