//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls
//! and business rules. Services consume repository traits and provide a clean
//! API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::auth_service::AuthService`] - Registration and password login
//! - [`services::user_service::UserService`] - Generic user records
//! - [`services::feature_service::FeatureService`] - Amenity tags
//! - [`services::property_service::PropertyService`] - Listings and their relations
//! - [`services::image_service::ImageService`] - Individual property images
//! - [`services::contact_service::ContactService`] - Inquiries about listings

pub mod services;
