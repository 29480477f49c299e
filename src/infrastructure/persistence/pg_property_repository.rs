//! PostgreSQL implementation of property repository.

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};
use std::collections::HashMap;
use std::sync::Arc;

use super::pg_feature_repository::upsert_feature;
use crate::domain::entities::{
    Feature, NewProperty, Property, PropertyDetails, PropertyFilter, PropertyImage, PropertyPatch,
    PropertyType, User,
};
use crate::domain::repositories::PropertyRepository;
use crate::error::AppError;
use crate::utils::db_error::is_foreign_key_violation_on;
use serde_json::json;

/// Property columns joined with the owner's columns.
const PROPERTY_SELECT: &str = r#"
    SELECT p.id, p.title, p.price, p.city, p.address, p.area, p.latitude, p.longitude,
           p.property_type, p.description, p.owner_id, p.created_at, p.updated_at,
           u.email AS owner_email, u.username AS owner_username, u.name AS owner_name,
           u.first_name AS owner_first_name, u.last_name AS owner_last_name,
           u.password_hash AS owner_password_hash, u.date_joined AS owner_date_joined
    FROM properties p
    JOIN users u ON u.id = p.owner_id
"#;

#[derive(sqlx::FromRow)]
struct PropertyRow {
    id: i64,
    title: String,
    price: BigDecimal,
    city: String,
    address: String,
    area: String,
    latitude: Option<BigDecimal>,
    longitude: Option<BigDecimal>,
    property_type: PropertyType,
    description: String,
    owner_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    owner_email: String,
    owner_username: String,
    owner_name: String,
    owner_first_name: String,
    owner_last_name: String,
    owner_password_hash: Option<String>,
    owner_date_joined: DateTime<Utc>,
}

impl PropertyRow {
    fn into_parts(self) -> (Property, User) {
        let owner = User {
            id: self.owner_id,
            email: self.owner_email,
            username: self.owner_username,
            name: self.owner_name,
            first_name: self.owner_first_name,
            last_name: self.owner_last_name,
            password_hash: self.owner_password_hash,
            date_joined: self.owner_date_joined,
        };
        let property = Property {
            id: self.id,
            title: self.title,
            price: self.price,
            city: self.city,
            address: self.address,
            area: self.area,
            latitude: self.latitude,
            longitude: self.longitude,
            property_type: self.property_type,
            description: self.description,
            owner_id: self.owner_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        };
        (property, owner)
    }
}

#[derive(sqlx::FromRow)]
struct PropertyFeatureRow {
    property_id: i64,
    id: i64,
    name: String,
}

/// PostgreSQL repository for property listings.
///
/// Reads load the owner with a join and the features and images of all
/// returned properties with one query each.
pub struct PgPropertyRepository {
    pool: Arc<PgPool>,
}

impl PgPropertyRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Attaches features and images to loaded rows, preserving row order.
    async fn load_relations(&self, rows: Vec<PropertyRow>) -> Result<Vec<PropertyDetails>, AppError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();

        let (feature_rows, image_rows) = tokio::try_join!(
            sqlx::query_as::<_, PropertyFeatureRow>(
                r#"
                SELECT pf.property_id, f.id, f.name
                FROM property_features pf
                JOIN features f ON f.id = pf.feature_id
                WHERE pf.property_id = ANY($1)
                ORDER BY f.name
                "#,
            )
            .bind(&ids)
            .fetch_all(self.pool.as_ref()),
            sqlx::query_as::<_, PropertyImage>(
                r#"
                SELECT id, property_id, image
                FROM property_images
                WHERE property_id = ANY($1)
                ORDER BY id
                "#,
            )
            .bind(&ids)
            .fetch_all(self.pool.as_ref()),
        )?;

        let mut features: HashMap<i64, Vec<Feature>> = HashMap::new();
        for r in feature_rows {
            features
                .entry(r.property_id)
                .or_default()
                .push(Feature::new(r.id, r.name));
        }

        let mut images: HashMap<i64, Vec<PropertyImage>> = HashMap::new();
        for image in image_rows {
            images.entry(image.property_id).or_default().push(image);
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let id = row.id;
                let (property, owner) = row.into_parts();
                PropertyDetails {
                    property,
                    owner,
                    features: features.remove(&id).unwrap_or_default(),
                    images: images.remove(&id).unwrap_or_default(),
                }
            })
            .collect())
    }

    async fn load_one(&self, id: i64) -> Result<Option<PropertyDetails>, AppError> {
        let sql = format!("{PROPERTY_SELECT} WHERE p.id = $1");

        let row = sqlx::query_as::<_, PropertyRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        match row {
            Some(row) => Ok(self.load_relations(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn load_existing(&self, id: i64) -> Result<PropertyDetails, AppError> {
        self.load_one(id)
            .await?
            .ok_or_else(|| AppError::not_found("Property not found", json!({"id": id})))
    }
}

/// Associates each named feature with the property, creating missing ones.
///
/// Feature rows are upserted in name order so that two transactions
/// touching the same features lock them in the same order.
async fn add_features(
    conn: &mut PgConnection,
    property_id: i64,
    names: &[String],
) -> Result<(), AppError> {
    let mut sorted: Vec<&String> = names.iter().collect();
    sorted.sort();

    for name in sorted {
        let feature = upsert_feature(&mut *conn, name).await?;
        sqlx::query(
            r#"
            INSERT INTO property_features (property_id, feature_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(property_id)
        .bind(feature.id)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

/// Inserts one image row per URL, in order.
async fn add_images(
    conn: &mut PgConnection,
    property_id: i64,
    urls: &[String],
) -> Result<(), AppError> {
    for url in urls {
        sqlx::query("INSERT INTO property_images (property_id, image) VALUES ($1, $2)")
            .bind(property_id)
            .bind(url)
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}

#[async_trait]
impl PropertyRepository for PgPropertyRepository {
    async fn create(&self, new_property: NewProperty) -> Result<PropertyDetails, AppError> {
        let mut tx = self.pool.begin().await?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO properties
                (title, price, city, address, area, latitude, longitude,
                 property_type, description, owner_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id
            "#,
        )
        .bind(&new_property.title)
        .bind(&new_property.price)
        .bind(&new_property.city)
        .bind(&new_property.address)
        .bind(&new_property.area)
        .bind(&new_property.latitude)
        .bind(&new_property.longitude)
        .bind(new_property.property_type)
        .bind(&new_property.description)
        .bind(new_property.owner_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_foreign_key_violation_on(&e, "properties_owner_id_fkey") {
                AppError::not_found("User not found", json!({"id": new_property.owner_id}))
            } else {
                e.into()
            }
        })?;

        add_features(&mut tx, id, &new_property.features).await?;
        add_images(&mut tx, id, &new_property.images).await?;

        tx.commit().await?;

        self.load_existing(id).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<PropertyDetails>, AppError> {
        self.load_one(id).await
    }

    async fn list(&self, filter: PropertyFilter) -> Result<Vec<PropertyDetails>, AppError> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(PROPERTY_SELECT);
        qb.push(" WHERE TRUE");

        if let Some(owner_id) = filter.owner_id {
            qb.push(" AND p.owner_id = ").push_bind(owner_id);
        }
        if let Some(city) = filter.city {
            qb.push(" AND p.city = ").push_bind(city);
        }
        if let Some(property_type) = filter.property_type {
            qb.push(" AND p.property_type = ").push_bind(property_type);
        }
        if let Some(min_price) = filter.min_price {
            qb.push(" AND p.price >= ").push_bind(min_price);
        }
        if let Some(max_price) = filter.max_price {
            qb.push(" AND p.price <= ").push_bind(max_price);
        }

        qb.push(" ORDER BY p.created_at DESC, p.id DESC");

        let rows = qb
            .build_query_as::<PropertyRow>()
            .fetch_all(self.pool.as_ref())
            .await?;

        self.load_relations(rows).await
    }

    async fn update(&self, id: i64, patch: PropertyPatch) -> Result<PropertyDetails, AppError> {
        let mut tx = self.pool.begin().await?;

        // Serializes concurrent replacements of the same property.
        let locked: Option<i64> =
            sqlx::query_scalar("SELECT id FROM properties WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        if locked.is_none() {
            return Err(AppError::not_found("Property not found", json!({"id": id})));
        }

        let set_latitude = patch.latitude.is_some();
        let set_longitude = patch.longitude.is_some();

        sqlx::query(
            r#"
            UPDATE properties SET
                title         = COALESCE($2::TEXT, title),
                price         = COALESCE($3::NUMERIC, price),
                city          = COALESCE($4::TEXT, city),
                address       = COALESCE($5::TEXT, address),
                area          = COALESCE($6::TEXT, area),
                latitude      = CASE WHEN $7 THEN $8::NUMERIC ELSE latitude END,
                longitude     = CASE WHEN $9 THEN $10::NUMERIC ELSE longitude END,
                property_type = COALESCE($11::property_type, property_type),
                description   = COALESCE($12::TEXT, description),
                updated_at    = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(patch.title)
        .bind(patch.price)
        .bind(patch.city)
        .bind(patch.address)
        .bind(patch.area)
        .bind(set_latitude)
        .bind(patch.latitude.flatten())
        .bind(set_longitude)
        .bind(patch.longitude.flatten())
        .bind(patch.property_type)
        .bind(patch.description)
        .execute(&mut *tx)
        .await?;

        if let Some(features) = patch.features {
            sqlx::query("DELETE FROM property_features WHERE property_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            add_features(&mut tx, id, &features).await?;
        }

        if let Some(images) = patch.images {
            sqlx::query("DELETE FROM property_images WHERE property_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            add_images(&mut tx, id, &images).await?;
        }

        tx.commit().await?;

        self.load_existing(id).await
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM properties WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn exists(&self, id: i64) -> Result<bool, AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM properties WHERE id = $1)")
                .bind(id)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(exists)
    }
}
