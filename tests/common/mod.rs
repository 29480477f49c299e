#![allow(dead_code)]

use axum_test::TestServer;
use estate_listings::routes::router;
use estate_listings::state::AppState;
use estate_listings::utils::password::{MIN_ITERATIONS, PasswordHasher};
use sqlx::PgPool;

/// Password stored by [`create_test_user_with_password`].
pub const TEST_PASSWORD: &str = "correct horse";

pub fn create_test_state(pool: PgPool) -> AppState {
    AppState::new(pool, PasswordHasher::new(MIN_ITERATIONS))
}

/// Test server over the full route table (`/health` and `/api/*`).
pub fn make_server(pool: PgPool) -> TestServer {
    TestServer::new(router(create_test_state(pool))).unwrap()
}

pub async fn create_test_user(pool: &PgPool, email: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO users (email, username, name, first_name, last_name)
         VALUES ($1, $1, 'Test User', 'Test', 'User') RETURNING id",
    )
    .bind(email)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_user_with_password(pool: &PgPool, email: &str) -> i64 {
    let hash = PasswordHasher::new(MIN_ITERATIONS).hash(TEST_PASSWORD);

    sqlx::query_scalar(
        "INSERT INTO users (email, username, name, first_name, last_name, password_hash)
         VALUES ($1, $1, 'Test User', 'Test', 'User', $2) RETURNING id",
    )
    .bind(email)
    .bind(hash)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_property(pool: &PgPool, owner_id: i64, title: &str, city: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO properties (title, price, city, property_type, owner_id)
         VALUES ($1, 100000, $2, 'Buy', $3) RETURNING id",
    )
    .bind(title)
    .bind(city)
    .bind(owner_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_feature(pool: &PgPool, name: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO features (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_test_image(pool: &PgPool, property_id: i64, url: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO property_images (property_id, image) VALUES ($1, $2) RETURNING id",
    )
    .bind(property_id)
    .bind(url)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn count_rows(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn feature_count_named(pool: &PgPool, name: &str) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM features WHERE name = $1")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}
