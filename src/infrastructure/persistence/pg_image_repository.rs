//! PostgreSQL implementation of image repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewPropertyImage, PropertyImage, PropertyImagePatch};
use crate::domain::repositories::ImageRepository;
use crate::error::{AppError, FieldErrors};
use crate::utils::db_error::is_foreign_key_violation_on;

/// Maps a dangling property reference to a field error on `property`.
fn map_property_fk(e: sqlx::Error, property_id: Option<i64>) -> AppError {
    match property_id {
        Some(id) if is_foreign_key_violation_on(&e, "property_images_property_id_fkey") => {
            let mut errors = FieldErrors::new();
            errors.add("property", format!("Invalid pk \"{id}\" - object does not exist."));
            AppError::fields(errors)
        }
        _ => e.into(),
    }
}

/// PostgreSQL repository for property images.
pub struct PgImageRepository {
    pool: Arc<PgPool>,
}

impl PgImageRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ImageRepository for PgImageRepository {
    async fn create(&self, new_image: NewPropertyImage) -> Result<PropertyImage, AppError> {
        let image = sqlx::query_as::<_, PropertyImage>(
            r#"
            INSERT INTO property_images (property_id, image)
            VALUES ($1, $2)
            RETURNING id, property_id, image
            "#,
        )
        .bind(new_image.property_id)
        .bind(&new_image.image)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| map_property_fk(e, Some(new_image.property_id)))?;

        Ok(image)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<PropertyImage>, AppError> {
        let image = sqlx::query_as::<_, PropertyImage>(
            "SELECT id, property_id, image FROM property_images WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(image)
    }

    async fn list(&self) -> Result<Vec<PropertyImage>, AppError> {
        let images = sqlx::query_as::<_, PropertyImage>(
            "SELECT id, property_id, image FROM property_images ORDER BY id",
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(images)
    }

    async fn update(&self, id: i64, patch: PropertyImagePatch) -> Result<PropertyImage, AppError> {
        let property_id = patch.property_id;

        let image = sqlx::query_as::<_, PropertyImage>(
            r#"
            UPDATE property_images SET
                property_id = COALESCE($2::BIGINT, property_id),
                image       = COALESCE($3::TEXT, image)
            WHERE id = $1
            RETURNING id, property_id, image
            "#,
        )
        .bind(id)
        .bind(patch.property_id)
        .bind(patch.image)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(|e| map_property_fk(e, property_id))?;

        image.ok_or_else(|| AppError::not_found("Image not found", serde_json::json!({"id": id})))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM property_images WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
