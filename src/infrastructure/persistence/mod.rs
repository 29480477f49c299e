//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx runtime
//! queries against the schema in `migrations/`.
//!
//! # Repositories
//!
//! - [`PgUserRepository`] - Accounts and credentials
//! - [`PgFeatureRepository`] - Amenity tags
//! - [`PgPropertyRepository`] - Listings with their features and images
//! - [`PgImageRepository`] - Individual property images
//! - [`PgContactMessageRepository`] - Inquiries about properties

pub mod pg_contact_message_repository;
pub mod pg_feature_repository;
pub mod pg_image_repository;
pub mod pg_property_repository;
pub mod pg_user_repository;

pub use pg_contact_message_repository::PgContactMessageRepository;
pub use pg_feature_repository::PgFeatureRepository;
pub use pg_image_repository::PgImageRepository;
pub use pg_property_repository::PgPropertyRepository;
pub use pg_user_repository::PgUserRepository;
