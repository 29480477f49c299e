//! Repository trait for property listings.

use crate::domain::entities::{NewProperty, PropertyDetails, PropertyFilter, PropertyPatch};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing properties together with their
/// feature associations and images.
///
/// Every method returns fully loaded [`PropertyDetails`] (owner, features,
/// images). Writes touching more than one table are atomic: a concurrent
/// reader sees either the state before or after the write, never a property
/// whose features or images are half replaced.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgPropertyRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_property.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PropertyRepository: Send + Sync {
    /// Creates a property, looks up or creates each named feature and
    /// associates it, then stores the images in input order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the owner does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_property: NewProperty) -> Result<PropertyDetails, AppError>;

    /// Finds a property by ID with its relations.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<PropertyDetails>, AppError>;

    /// Lists properties matching the filter, newest first.
    ///
    /// Relations are loaded in bulk, not per row.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self, filter: PropertyFilter) -> Result<Vec<PropertyDetails>, AppError>;

    /// Applies a partial update.
    ///
    /// `patch.features: Some(_)` clears and re-adds the associations;
    /// `patch.images: Some(_)` deletes and recreates the images.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the property does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn update(&self, id: i64, patch: PropertyPatch) -> Result<PropertyDetails, AppError>;

    /// Deletes a property; images and contact messages cascade.
    ///
    /// Returns `Ok(false)` if no such property exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Returns true if a property with this ID exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn exists(&self, id: i64) -> Result<bool, AppError>;
}
