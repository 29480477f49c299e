//! Business logic services for the application layer.

pub mod auth_service;
pub mod contact_service;
pub mod feature_service;
pub mod image_service;
pub mod property_service;
pub mod user_service;

pub use auth_service::{AuthService, Registration};
pub use contact_service::ContactService;
pub use feature_service::FeatureService;
pub use image_service::ImageService;
pub use property_service::PropertyService;
pub use user_service::UserService;
