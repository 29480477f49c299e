//! Domain layer containing the listing data model.
//!
//! Entities and repository interfaces, independent of infrastructure and
//! presentation concerns.
//!
//! - [`entities`] - Core data structures and derived attributes
//! - [`repositories`] - Data access trait definitions
//!
//! Business rules that span repositories live in services
//! (see [`crate::application::services`]).

pub mod entities;
pub mod repositories;
