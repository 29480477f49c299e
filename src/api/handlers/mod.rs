//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to one resource.

pub mod auth;
pub mod contact_messages;
pub mod features;
pub mod health;
pub mod images;
pub mod properties;
pub mod users;

pub use auth::{login_handler, register_handler};
pub use contact_messages::create_contact_message_handler;
pub use features::{
    create_feature_handler, delete_feature_handler, feature_list_handler, get_feature_handler,
    update_feature_handler,
};
pub use health::health_handler;
pub use images::{
    create_image_handler, delete_image_handler, get_image_handler, image_list_handler,
    update_image_handler,
};
pub use properties::{
    create_property_handler, delete_property_handler, get_property_handler,
    property_list_handler, update_property_handler,
};
pub use users::{
    create_user_handler, delete_user_handler, get_user_handler, update_user_handler,
    user_list_handler,
};
