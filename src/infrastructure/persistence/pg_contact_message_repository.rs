//! PostgreSQL implementation of contact message repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{ContactMessage, NewContactMessage};
use crate::domain::repositories::ContactMessageRepository;
use crate::error::{AppError, FieldErrors};
use crate::utils::db_error::is_foreign_key_violation_on;

/// PostgreSQL repository for property inquiries.
pub struct PgContactMessageRepository {
    pool: Arc<PgPool>,
}

impl PgContactMessageRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContactMessageRepository for PgContactMessageRepository {
    async fn create(&self, new_message: NewContactMessage) -> Result<ContactMessage, AppError> {
        let message = sqlx::query_as::<_, ContactMessage>(
            r#"
            INSERT INTO contact_messages (property_id, name, email, message)
            VALUES ($1, $2, $3, $4)
            RETURNING id, property_id, name, email, message, created_at
            "#,
        )
        .bind(new_message.property_id)
        .bind(&new_message.name)
        .bind(&new_message.email)
        .bind(&new_message.message)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| {
            if is_foreign_key_violation_on(&e, "contact_messages_property_id_fkey") {
                let mut errors = FieldErrors::new();
                errors.add(
                    "property",
                    format!(
                        "Invalid pk \"{}\" - object does not exist.",
                        new_message.property_id
                    ),
                );
                AppError::fields(errors)
            } else {
                e.into()
            }
        })?;

        Ok(message)
    }

    async fn list_for_property(&self, property_id: i64) -> Result<Vec<ContactMessage>, AppError> {
        let messages = sqlx::query_as::<_, ContactMessage>(
            r#"
            SELECT id, property_id, name, email, message, created_at
            FROM contact_messages
            WHERE property_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(property_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(messages)
    }
}
