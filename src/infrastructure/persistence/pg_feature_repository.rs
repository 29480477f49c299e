//! PostgreSQL implementation of feature repository.

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use std::sync::Arc;

use crate::domain::entities::Feature;
use crate::domain::repositories::FeatureRepository;
use crate::error::AppError;
use crate::utils::db_error::is_unique_violation_on;
use serde_json::json;

/// Looks up or creates a feature by name in a single statement.
///
/// The no-op `DO UPDATE` makes `RETURNING` yield the existing row on
/// conflict. A concurrent insert of the same name blocks on the unique index
/// until the other transaction finishes, so exactly one row ever exists.
pub(crate) async fn upsert_feature(conn: &mut PgConnection, name: &str) -> Result<Feature, AppError> {
    let feature = sqlx::query_as::<_, Feature>(
        r#"
        INSERT INTO features (name)
        VALUES ($1)
        ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
        RETURNING id, name
        "#,
    )
    .bind(name)
    .fetch_one(conn)
    .await?;

    Ok(feature)
}

/// PostgreSQL repository for amenity features.
pub struct PgFeatureRepository {
    pool: Arc<PgPool>,
}

impl PgFeatureRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FeatureRepository for PgFeatureRepository {
    async fn get_or_create(&self, name: &str) -> Result<Feature, AppError> {
        let mut conn = self.pool.acquire().await?;
        upsert_feature(&mut conn, name).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Feature>, AppError> {
        let feature = sqlx::query_as::<_, Feature>("SELECT id, name FROM features WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(feature)
    }

    async fn list(&self) -> Result<Vec<Feature>, AppError> {
        let features = sqlx::query_as::<_, Feature>("SELECT id, name FROM features ORDER BY name")
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(features)
    }

    async fn rename(&self, id: i64, name: &str) -> Result<Feature, AppError> {
        let feature = sqlx::query_as::<_, Feature>(
            "UPDATE features SET name = $2 WHERE id = $1 RETURNING id, name",
        )
        .bind(id)
        .bind(name)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(|e| {
            if is_unique_violation_on(&e, "features_name_key") {
                AppError::conflict("Feature with this name already exists.", json!({"name": name}))
            } else {
                e.into()
            }
        })?;

        feature.ok_or_else(|| AppError::not_found("Feature not found", json!({"id": id})))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM features WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
