mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};
use sqlx::PgPool;

#[sqlx::test]
async fn test_create_feature(pool: PgPool) {
    let server = common::make_server(pool);
    let response = server
        .post("/api/features")
        .json(&json!({ "name": "  Sea View " }))
        .await;

    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.json::<Value>()["name"], "Sea View");
}

#[sqlx::test]
async fn test_create_feature_is_lookup_or_create(pool: PgPool) {
    let existing = common::create_test_feature(&pool, "Gym").await;

    let server = common::make_server(pool.clone());
    let response = server
        .post("/api/features")
        .json(&json!({ "name": "Gym" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.json::<Value>()["id"], existing);
    assert_eq!(common::feature_count_named(&pool, "Gym").await, 1);
}

#[sqlx::test]
async fn test_create_feature_validation(pool: PgPool) {
    let server = common::make_server(pool);

    let response = server.post("/api/features").json(&json!({})).await;
    response.assert_status_bad_request();
    assert_eq!(
        response.json::<Value>()["name"],
        json!(["This field is required."])
    );

    let response = server
        .post("/api/features")
        .json(&json!({ "name": "   " }))
        .await;
    response.assert_status_bad_request();
    assert_eq!(
        response.json::<Value>()["name"],
        json!(["This field may not be blank."])
    );

    let response = server
        .post("/api/features")
        .json(&json!({ "name": "x".repeat(101) }))
        .await;
    response.assert_status_bad_request();
}

#[sqlx::test]
async fn test_list_and_get_features(pool: PgPool) {
    let pool_id = common::create_test_feature(&pool, "Pool").await;
    common::create_test_feature(&pool, "Gym").await;

    let server = common::make_server(pool);

    let response = server.get("/api/features").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>().as_array().unwrap().len(), 2);

    let response = server.get(&format!("/api/features/{pool_id}")).await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["name"], "Pool");

    server
        .get("/api/features/424242")
        .await
        .assert_status_not_found();
}

#[sqlx::test]
async fn test_rename_feature(pool: PgPool) {
    let id = common::create_test_feature(&pool, "Wifi").await;

    let server = common::make_server(pool);
    let response = server
        .put(&format!("/api/features/{id}"))
        .json(&json!({ "name": "WiFi" }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["name"], "WiFi");
}

#[sqlx::test]
async fn test_rename_feature_onto_existing_name(pool: PgPool) {
    common::create_test_feature(&pool, "Gym").await;
    let id = common::create_test_feature(&pool, "Pool").await;

    let server = common::make_server(pool);
    let response = server
        .patch(&format!("/api/features/{id}"))
        .json(&json!({ "name": "Gym" }))
        .await;

    response.assert_status_bad_request();
    assert!(response.json::<Value>()["error"].is_string());
}

#[sqlx::test]
async fn test_delete_feature_detaches_from_properties(pool: PgPool) {
    let owner_id = common::create_test_user(&pool, "owner@example.com").await;
    let server = common::make_server(pool.clone());

    let created = server
        .post("/api/properties")
        .json(&json!({
            "title": "Flat",
            "price": "1000.50",
            "city": "Pune",
            "type": "Rent",
            "owner": owner_id,
            "features": ["Gym"],
        }))
        .await
        .json::<Value>();
    let property_id = created["id"].as_i64().unwrap();
    let feature_id = created["features"][0]["id"].as_i64().unwrap();

    server
        .delete(&format!("/api/features/{feature_id}"))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let property = server
        .get(&format!("/api/properties/{property_id}"))
        .await
        .json::<Value>();
    assert_eq!(property["features"], json!([]));
    assert_eq!(common::count_rows(&pool, "property_features").await, 0);
}
