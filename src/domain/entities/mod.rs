//! Core domain entities representing the listing data model.
//!
//! Entities are plain data structures. Creation and partial updates use
//! separate structs:
//! - `NewUser`, `NewProperty`, `NewPropertyImage`, `NewContactMessage` - for creating records
//! - `UserPatch`, `PropertyPatch`, `PropertyImagePatch` - for partial updates
//!
//! # Entity Types
//!
//! - [`User`] - An account; owns properties
//! - [`Feature`] - A named amenity tag shared across properties
//! - [`Property`] - A listing, with [`PropertyDetails`] bundling its relations
//! - [`PropertyImage`] - An image URL belonging to a property
//! - [`ContactMessage`] - An inquiry about a property

pub mod contact_message;
pub mod feature;
pub mod property;
pub mod property_image;
pub mod user;

pub use contact_message::{ContactMessage, NewContactMessage};
pub use feature::{Feature, FeatureNames, normalize_names};
pub use property::{
    InvalidPropertyType, NewProperty, Property, PropertyDetails, PropertyFilter, PropertyPatch,
    PropertyType,
};
pub use property_image::{NewPropertyImage, PropertyImage, PropertyImagePatch};
pub use user::{NewUser, User, UserPatch};
