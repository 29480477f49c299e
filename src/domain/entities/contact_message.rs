//! Contact message entity: an inquiry about a property.

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct ContactMessage {
    pub id: i64,
    pub property_id: i64,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewContactMessage {
    pub property_id: i64,
    pub name: String,
    pub email: String,
    pub message: String,
}
