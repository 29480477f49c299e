//! Property listing service.

use std::sync::Arc;
use tracing::info;

use crate::domain::entities::{NewProperty, PropertyDetails, PropertyFilter, PropertyPatch, User};
use crate::domain::repositories::{PropertyRepository, UserRepository};
use crate::error::AppError;
use serde_json::json;

/// Service for property listings and their features and images.
///
/// # Update semantics
///
/// - Fields absent from a patch keep their stored values
/// - A provided feature list replaces every association, so `[]` clears them
/// - A provided image list replaces every image only when it is non-empty;
///   an empty list leaves the images untouched
/// - The owner is fixed at creation
pub struct PropertyService<P: PropertyRepository, U: UserRepository> {
    properties: Arc<P>,
    users: Arc<U>,
}

impl<P: PropertyRepository, U: UserRepository> PropertyService<P, U> {
    /// Creates a new property service.
    pub fn new(properties: Arc<P>, users: Arc<U>) -> Self {
        Self { properties, users }
    }

    /// Loads the user a new listing will belong to.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn resolve_owner(&self, owner_id: i64) -> Result<User, AppError> {
        self.users
            .find_by_id(owner_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({"id": owner_id})))
    }

    /// Creates a listing with its features and images.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the owner does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn create_property(
        &self,
        new_property: NewProperty,
    ) -> Result<PropertyDetails, AppError> {
        let created = self.properties.create(new_property).await?;

        info!(
            property_id = created.property.id,
            owner_id = created.owner.id,
            features = created.features.len(),
            images = created.images.len(),
            "Property created"
        );

        Ok(created)
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the property does not exist.
    pub async fn get_property(&self, id: i64) -> Result<PropertyDetails, AppError> {
        self.properties
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Property not found", json!({"id": id})))
    }

    /// Lists listings matching the filter, newest first.
    pub async fn list_properties(
        &self,
        filter: PropertyFilter,
    ) -> Result<Vec<PropertyDetails>, AppError> {
        self.properties.list(filter).await
    }

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the property does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn update_property(
        &self,
        id: i64,
        mut patch: PropertyPatch,
    ) -> Result<PropertyDetails, AppError> {
        if patch.images.as_ref().is_some_and(Vec::is_empty) {
            patch.images = None;
        }

        let updated = self.properties.update(id, patch).await?;

        info!(property_id = id, "Property updated");

        Ok(updated)
    }

    /// Deletes a listing together with its images and contact messages.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the property does not exist.
    pub async fn delete_property(&self, id: i64) -> Result<(), AppError> {
        if !self.properties.delete(id).await? {
            return Err(AppError::not_found("Property not found", json!({"id": id})));
        }

        info!(property_id = id, "Property deleted");
        Ok(())
    }
}
