//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access following the Repository pattern and are
//! implemented by the PostgreSQL repositories in the infrastructure layer.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`UserRepository`] - Accounts and credentials
//! - [`FeatureRepository`] - Amenity tags with lookup-or-create
//! - [`PropertyRepository`] - Listings with features and images
//! - [`ImageRepository`] - Individual property images
//! - [`ContactMessageRepository`] - Inquiries about properties

pub mod contact_message_repository;
pub mod feature_repository;
pub mod image_repository;
pub mod property_repository;
pub mod user_repository;

pub use contact_message_repository::ContactMessageRepository;
pub use feature_repository::FeatureRepository;
pub use image_repository::ImageRepository;
pub use property_repository::PropertyRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use contact_message_repository::MockContactMessageRepository;
#[cfg(test)]
pub use feature_repository::MockFeatureRepository;
#[cfg(test)]
pub use image_repository::MockImageRepository;
#[cfg(test)]
pub use property_repository::MockPropertyRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
