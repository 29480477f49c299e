//! API route configuration.
//!
//! No endpoint requires authentication.

use crate::api::handlers::{
    create_contact_message_handler, create_feature_handler, create_image_handler,
    create_property_handler, create_user_handler, delete_feature_handler, delete_image_handler,
    delete_property_handler, delete_user_handler, feature_list_handler, get_feature_handler,
    get_image_handler, get_property_handler, get_user_handler, image_list_handler, login_handler,
    property_list_handler, register_handler, update_feature_handler, update_image_handler,
    update_property_handler, update_user_handler, user_list_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All API routes, mounted under `/api`.
///
/// # Endpoints
///
/// - `POST /register`, `POST /login`
/// - `GET|POST /users`, `GET|PUT|PATCH|DELETE /users/{id}`
/// - `GET|POST /features`, `GET|PUT|PATCH|DELETE /features/{id}`
/// - `GET|POST /images`, `GET|PUT|PATCH|DELETE /images/{id}`
/// - `GET|POST /properties`, `GET|PUT|PATCH|DELETE /properties/{id}`
/// - `POST /contact-messages`
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
        .route("/users", get(user_list_handler).post(create_user_handler))
        .route(
            "/users/{id}",
            get(get_user_handler)
                .put(update_user_handler)
                .patch(update_user_handler)
                .delete(delete_user_handler),
        )
        .route(
            "/features",
            get(feature_list_handler).post(create_feature_handler),
        )
        .route(
            "/features/{id}",
            get(get_feature_handler)
                .put(update_feature_handler)
                .patch(update_feature_handler)
                .delete(delete_feature_handler),
        )
        .route("/images", get(image_list_handler).post(create_image_handler))
        .route(
            "/images/{id}",
            get(get_image_handler)
                .put(update_image_handler)
                .patch(update_image_handler)
                .delete(delete_image_handler),
        )
        .route(
            "/properties",
            get(property_list_handler).post(create_property_handler),
        )
        .route(
            "/properties/{id}",
            get(get_property_handler)
                .put(update_property_handler)
                .patch(update_property_handler)
                .delete(delete_property_handler),
        )
        .route("/contact-messages", post(create_contact_message_handler))
}
