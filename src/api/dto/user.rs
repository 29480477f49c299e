//! DTOs for user records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{NewUser, User, UserPatch};

/// Public user shape. Never includes the password credential.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub name: String,
    pub first_name: String,
    pub last_name: String,
    pub date_joined: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            username: u.username,
            name: u.name,
            first_name: u.first_name,
            last_name: u.last_name,
            date_joined: u.date_joined,
        }
    }
}

/// Owner summary nested inside a property.
#[derive(Debug, Serialize)]
pub struct OwnerSummary {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<User> for OwnerSummary {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            name: u.name,
            first_name: u.first_name,
            last_name: u.last_name,
        }
    }
}

/// Request body for `POST /api/users`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,
    #[validate(length(max = 100, message = "Ensure this field has no more than 100 characters."))]
    pub name: Option<String>,
    #[validate(length(max = 150, message = "Ensure this field has no more than 150 characters."))]
    pub first_name: Option<String>,
    #[validate(length(max = 150, message = "Ensure this field has no more than 150 characters."))]
    pub last_name: Option<String>,
}

impl From<CreateUserRequest> for NewUser {
    fn from(req: CreateUserRequest) -> Self {
        let first_name = req.first_name.unwrap_or_default();
        let last_name = req.last_name.unwrap_or_default();
        let name = req
            .name
            .unwrap_or_else(|| NewUser::display_name(&first_name, &last_name));

        NewUser {
            email: req.email.trim().to_string(),
            name,
            first_name,
            last_name,
            password_hash: None,
        }
    }
}

/// Request body for `PUT|PATCH /api/users/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(email(message = "Enter a valid email address."))]
    pub email: Option<String>,
    #[validate(length(max = 100, message = "Ensure this field has no more than 100 characters."))]
    pub name: Option<String>,
    #[validate(length(max = 150, message = "Ensure this field has no more than 150 characters."))]
    pub first_name: Option<String>,
    #[validate(length(max = 150, message = "Ensure this field has no more than 150 characters."))]
    pub last_name: Option<String>,
}

impl From<UpdateUserRequest> for UserPatch {
    fn from(req: UpdateUserRequest) -> Self {
        UserPatch {
            email: req.email.map(|e| e.trim().to_string()),
            name: req.name,
            first_name: req.first_name,
            last_name: req.last_name,
        }
    }
}
