//! Feature (amenity tag) management.

use std::sync::Arc;
use tracing::info;

use crate::domain::entities::Feature;
use crate::domain::repositories::FeatureRepository;
use crate::error::{AppError, FieldErrors};
use serde_json::json;

/// Service for the shared feature vocabulary.
pub struct FeatureService<R: FeatureRepository> {
    repository: Arc<R>,
}

impl<R: FeatureRepository> FeatureService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn list_features(&self) -> Result<Vec<Feature>, AppError> {
        self.repository.list().await
    }

    pub async fn get_feature(&self, id: i64) -> Result<Feature, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Feature not found", json!({"id": id})))
    }

    /// Returns the feature with this name, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the name is blank.
    pub async fn get_or_create(&self, name: &str) -> Result<Feature, AppError> {
        let name = checked_name(name)?;
        self.repository.get_or_create(name).await
    }

    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the name is blank.
    /// Returns [`AppError::NotFound`] if the feature does not exist.
    /// Returns [`AppError::Conflict`] if another feature has the name.
    pub async fn rename_feature(&self, id: i64, name: &str) -> Result<Feature, AppError> {
        let name = checked_name(name)?;
        let feature = self.repository.rename(id, name).await?;
        info!(feature_id = id, name = %feature.name, "Feature renamed");
        Ok(feature)
    }

    pub async fn delete_feature(&self, id: i64) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(AppError::not_found("Feature not found", json!({"id": id})));
        }

        info!(feature_id = id, "Feature deleted");
        Ok(())
    }
}

fn checked_name(name: &str) -> Result<&str, AppError> {
    let name = name.trim();
    if name.is_empty() {
        let mut errors = FieldErrors::new();
        errors.add("name", "This field may not be blank.");
        return Err(AppError::fields(errors));
    }
    Ok(name)
}
