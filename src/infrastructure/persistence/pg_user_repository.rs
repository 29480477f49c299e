//! PostgreSQL implementation of user repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewUser, User, UserPatch};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::utils::db_error::is_unique_violation_on;
use serde_json::json;

/// Column list shared by every user query.
pub(crate) const USER_COLUMNS: &str =
    "id, email, username, name, first_name, last_name, password_hash, date_joined";

#[derive(sqlx::FromRow)]
pub(crate) struct UserRow {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub name: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: Option<String>,
    pub date_joined: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(r: UserRow) -> Self {
        User {
            id: r.id,
            email: r.email,
            username: r.username,
            name: r.name,
            first_name: r.first_name,
            last_name: r.last_name,
            password_hash: r.password_hash,
            date_joined: r.date_joined,
        }
    }
}

/// Maps a unique violation on the email/username keys to a registration conflict.
fn map_email_conflict(e: sqlx::Error) -> AppError {
    if is_unique_violation_on(&e, "users_email_key")
        || is_unique_violation_on(&e, "users_username_key")
    {
        return AppError::conflict("Email already registered.", json!({}));
    }
    e.into()
}

/// PostgreSQL repository for user accounts.
pub struct PgUserRepository {
    pool: Arc<PgPool>,
}

impl PgUserRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let sql = format!(
            r#"
            INSERT INTO users (email, username, name, first_name, last_name, password_hash)
            VALUES ($1, $1, $2, $3, $4, $5)
            RETURNING {USER_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(&new_user.email)
            .bind(&new_user.name)
            .bind(&new_user.first_name)
            .bind(&new_user.last_name)
            .bind(&new_user.password_hash)
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(map_email_conflict)?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");

        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");

        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(email)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(User::from))
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY id");

        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn update(&self, id: i64, patch: UserPatch) -> Result<User, AppError> {
        let sql = format!(
            r#"
            UPDATE users SET
                email      = COALESCE($2::TEXT, email),
                username   = COALESCE($2::TEXT, username),
                name       = COALESCE($3::TEXT, name),
                first_name = COALESCE($4::TEXT, first_name),
                last_name  = COALESCE($5::TEXT, last_name)
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id)
            .bind(patch.email)
            .bind(patch.name)
            .bind(patch.first_name)
            .bind(patch.last_name)
            .fetch_optional(self.pool.as_ref())
            .await
            .map_err(map_email_conflict)?;

        row.map(User::from)
            .ok_or_else(|| AppError::not_found("User not found", json!({"id": id})))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
