//! Repository trait for amenity features.

use crate::domain::entities::Feature;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing features.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgFeatureRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeatureRepository: Send + Sync {
    /// Returns the feature with this name, creating it if needed.
    ///
    /// Idempotent under concurrency: the unique constraint on `name` guarantees
    /// a single row no matter how many callers race.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn get_or_create(&self, name: &str) -> Result<Feature, AppError>;

    /// Finds a feature by ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<Feature>, AppError>;

    /// Lists all features ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self) -> Result<Vec<Feature>, AppError>;

    /// Renames a feature.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the feature does not exist.
    /// Returns [`AppError::Conflict`] if another feature already has the name.
    /// Returns [`AppError::Internal`] on database errors.
    async fn rename(&self, id: i64, name: &str) -> Result<Feature, AppError>;

    /// Deletes a feature and its property associations.
    ///
    /// Returns `Ok(false)` if no such feature exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
