//! DTOs for registration and login.
//!
//! Every field is optional at the serde level so that missing fields reach
//! [`crate::application::services::AuthService`] and produce its messages
//! rather than a generic deserialization error.

use serde::Deserialize;

use crate::application::services::Registration;

#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl From<RegisterRequest> for Registration {
    fn from(req: RegisterRequest) -> Self {
        Registration {
            first_name: req.first_name.unwrap_or_default(),
            last_name: req.last_name.unwrap_or_default(),
            email: req.email.unwrap_or_default(),
            password: req.password.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}
