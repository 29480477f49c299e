//! Data Transfer Objects for API requests and responses.
//!
//! This is the validation and shaping layer: request DTOs turn raw JSON into
//! validated domain inputs, response DTOs turn entities into output shapes.
//! All DTOs use Serde; simple field rules use validator.

pub mod auth;
pub mod contact_message;
pub mod feature;
pub mod fields;
pub mod health;
pub mod image;
pub mod property;
pub mod user;
