//! Shared application state injected into every handler.

use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::{
    AuthService, ContactService, FeatureService, ImageService, PropertyService, UserService,
};
use crate::infrastructure::persistence::{
    PgContactMessageRepository, PgFeatureRepository, PgImageRepository, PgPropertyRepository,
    PgUserRepository,
};
use crate::utils::password::PasswordHasher;

/// Services wired to the PostgreSQL repositories.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService<PgUserRepository>>,
    pub user_service: Arc<UserService<PgUserRepository>>,
    pub feature_service: Arc<FeatureService<PgFeatureRepository>>,
    pub image_service: Arc<ImageService<PgImageRepository>>,
    pub property_service: Arc<PropertyService<PgPropertyRepository, PgUserRepository>>,
    pub contact_service: Arc<ContactService<PgContactMessageRepository, PgPropertyRepository>>,
    pub db: Arc<PgPool>,
}

impl AppState {
    /// Builds every repository and service on top of one pool.
    pub fn new(pool: PgPool, hasher: PasswordHasher) -> Self {
        let pool = Arc::new(pool);

        let user_repo = Arc::new(PgUserRepository::new(pool.clone()));
        let feature_repo = Arc::new(PgFeatureRepository::new(pool.clone()));
        let image_repo = Arc::new(PgImageRepository::new(pool.clone()));
        let property_repo = Arc::new(PgPropertyRepository::new(pool.clone()));
        let message_repo = Arc::new(PgContactMessageRepository::new(pool.clone()));

        Self {
            auth_service: Arc::new(AuthService::new(user_repo.clone(), hasher)),
            user_service: Arc::new(UserService::new(user_repo.clone())),
            feature_service: Arc::new(FeatureService::new(feature_repo)),
            image_service: Arc::new(ImageService::new(image_repo)),
            property_service: Arc::new(PropertyService::new(property_repo.clone(), user_repo)),
            contact_service: Arc::new(ContactService::new(message_repo, property_repo)),
            db: pool,
        }
    }
}
