//! Utility functions shared across layers.
//!
//! - [`password`] - Password credential hashing and verification
//! - [`db_error`] - Database error classification by constraint name

pub mod db_error;
pub mod password;
