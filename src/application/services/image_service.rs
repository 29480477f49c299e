//! Individual property image management.

use std::sync::Arc;
use tracing::info;

use crate::domain::entities::{NewPropertyImage, PropertyImage, PropertyImagePatch};
use crate::domain::repositories::ImageRepository;
use crate::error::AppError;
use serde_json::json;

/// Service for the image collection.
pub struct ImageService<R: ImageRepository> {
    repository: Arc<R>,
}

impl<R: ImageRepository> ImageService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn list_images(&self) -> Result<Vec<PropertyImage>, AppError> {
        self.repository.list().await
    }

    pub async fn get_image(&self, id: i64) -> Result<PropertyImage, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Image not found", json!({"id": id})))
    }

    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the property does not exist.
    pub async fn create_image(&self, new_image: NewPropertyImage) -> Result<PropertyImage, AppError> {
        let image = self.repository.create(new_image).await?;
        info!(image_id = image.id, property_id = image.property_id, "Image added");
        Ok(image)
    }

    pub async fn update_image(
        &self,
        id: i64,
        patch: PropertyImagePatch,
    ) -> Result<PropertyImage, AppError> {
        if patch == PropertyImagePatch::default() {
            return self.get_image(id).await;
        }

        self.repository.update(id, patch).await
    }

    pub async fn delete_image(&self, id: i64) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(AppError::not_found("Image not found", json!({"id": id})));
        }

        info!(image_id = id, "Image deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockImageRepository;

    fn image(id: i64, property_id: i64) -> PropertyImage {
        PropertyImage {
            id,
            property_id,
            image: "https://img.example.com/a.jpg".to_string(),
        }
    }

    #[tokio::test]
    async fn test_empty_patch_skips_write() {
        let mut mock_repo = MockImageRepository::new();
        mock_repo
            .expect_find_by_id()
            .times(1)
            .returning(|id| Ok(Some(image(id, 1))));
        mock_repo.expect_update().never();

        let service = ImageService::new(Arc::new(mock_repo));

        let result = service.update_image(4, PropertyImagePatch::default()).await;
        assert_eq!(result.unwrap().id, 4);
    }

    #[tokio::test]
    async fn test_delete_missing_image() {
        let mut mock_repo = MockImageRepository::new();
        mock_repo.expect_delete().returning(|_| Ok(false));

        let service = ImageService::new(Arc::new(mock_repo));

        let err = service.delete_image(4).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }
}
