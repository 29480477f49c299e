mod common;

use bigdecimal::BigDecimal;
use estate_listings::domain::entities::{
    NewProperty, PropertyDetails, PropertyFilter, PropertyPatch, PropertyType,
};
use estate_listings::domain::repositories::PropertyRepository;
use estate_listings::error::AppError;
use estate_listings::infrastructure::persistence::PgPropertyRepository;
use sqlx::PgPool;
use std::str::FromStr;
use std::sync::Arc;

fn new_property(owner_id: i64, title: &str) -> NewProperty {
    NewProperty {
        title: title.to_string(),
        price: BigDecimal::from(250_000),
        city: "Pune".to_string(),
        address: String::new(),
        area: String::new(),
        latitude: None,
        longitude: None,
        property_type: PropertyType::Buy,
        description: String::new(),
        owner_id,
        features: vec![],
        images: vec![],
    }
}

fn names(details: &PropertyDetails) -> Vec<&str> {
    details.features.iter().map(|f| f.name.as_str()).collect()
}

#[sqlx::test]
async fn test_create_property_with_relations(pool: PgPool) {
    let owner_id = common::create_test_user(&pool, "owner@example.com").await;
    let repo = PgPropertyRepository::new(Arc::new(pool));

    let mut input = new_property(owner_id, "Flat");
    input.features = vec!["Pool".to_string(), "Gym".to_string()];
    input.images = vec![
        "https://img.example.com/2.jpg".to_string(),
        "https://img.example.com/1.jpg".to_string(),
    ];

    let details = repo.create(input).await.unwrap();

    assert_eq!(details.owner.id, owner_id);
    assert_eq!(names(&details), vec!["Gym", "Pool"]);
    let images: Vec<&str> = details.images.iter().map(|i| i.image.as_str()).collect();
    assert_eq!(
        images,
        vec!["https://img.example.com/2.jpg", "https://img.example.com/1.jpg"]
    );
    assert_eq!(details.property.price.to_string(), "250000.00");
}

#[sqlx::test]
async fn test_create_property_unknown_owner(pool: PgPool) {
    let repo = PgPropertyRepository::new(Arc::new(pool.clone()));

    let result = repo.create(new_property(424242, "Orphan")).await;

    assert!(matches!(result, Err(AppError::NotFound { .. })));
    assert_eq!(common::count_rows(&pool, "properties").await, 0);
}

#[sqlx::test]
async fn test_concurrent_get_or_create_feature(pool: PgPool) {
    let owner_id = common::create_test_user(&pool, "owner@example.com").await;
    let repo = Arc::new(PgPropertyRepository::new(Arc::new(pool.clone())));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let repo = repo.clone();
            let mut input = new_property(owner_id, &format!("Flat {i}"));
            input.features = vec!["Sea View".to_string()];
            tokio::spawn(async move { repo.create(input).await })
        })
        .collect();

    let mut feature_ids = Vec::new();
    for handle in handles {
        let details = handle.await.unwrap().unwrap();
        feature_ids.push(details.features[0].id);
    }

    feature_ids.dedup();
    assert_eq!(feature_ids.len(), 1);
    assert_eq!(common::feature_count_named(&pool, "Sea View").await, 1);
    assert_eq!(common::count_rows(&pool, "property_features").await, 4);
}

#[sqlx::test]
async fn test_update_scalars_and_coordinates(pool: PgPool) {
    let owner_id = common::create_test_user(&pool, "owner@example.com").await;
    let repo = PgPropertyRepository::new(Arc::new(pool));

    let mut input = new_property(owner_id, "Flat");
    input.latitude = Some(BigDecimal::from_str("18.5204").unwrap());
    input.longitude = Some(BigDecimal::from_str("73.8567").unwrap());
    let created = repo.create(input).await.unwrap();
    assert!(created.property.has_location());

    let patch = PropertyPatch {
        title: Some("Renamed".to_string()),
        latitude: Some(None),
        property_type: Some(PropertyType::ShortStay),
        ..Default::default()
    };
    let updated = repo.update(created.property.id, patch).await.unwrap();

    assert_eq!(updated.property.title, "Renamed");
    assert_eq!(updated.property.city, "Pune");
    assert_eq!(updated.property.property_type, PropertyType::ShortStay);
    assert!(updated.property.latitude.is_none());
    assert!(updated.property.longitude.is_some());
    assert!(!updated.property.has_location());
    assert!(updated.property.updated_at >= created.property.updated_at);
}

#[sqlx::test]
async fn test_update_replaces_features_and_images(pool: PgPool) {
    let owner_id = common::create_test_user(&pool, "owner@example.com").await;
    let repo = PgPropertyRepository::new(Arc::new(pool));

    let mut input = new_property(owner_id, "Flat");
    input.features = vec!["Gym".to_string()];
    input.images = vec!["https://img.example.com/old.jpg".to_string()];
    let created = repo.create(input).await.unwrap();
    let id = created.property.id;

    let patch = PropertyPatch {
        features: Some(vec!["Parking".to_string(), "Garden".to_string()]),
        images: Some(vec!["https://img.example.com/new.jpg".to_string()]),
        ..Default::default()
    };
    let updated = repo.update(id, patch).await.unwrap();

    assert_eq!(names(&updated), vec!["Garden", "Parking"]);
    assert_eq!(updated.images.len(), 1);
    assert_eq!(updated.images[0].image, "https://img.example.com/new.jpg");

    let cleared = repo
        .update(
            id,
            PropertyPatch {
                features: Some(vec![]),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert!(cleared.features.is_empty());
    assert_eq!(cleared.images.len(), 1);
}

#[sqlx::test]
async fn test_concurrent_readers_see_whole_replacements(pool: PgPool) {
    let owner_id = common::create_test_user(&pool, "owner@example.com").await;
    let repo = Arc::new(PgPropertyRepository::new(Arc::new(pool)));

    let mut input = new_property(owner_id, "Flat");
    input.features = vec!["Gym".to_string(), "Pool".to_string()];
    input.images = vec![
        "https://img.example.com/a.jpg".to_string(),
        "https://img.example.com/b.jpg".to_string(),
    ];
    let id = repo.create(input).await.unwrap().property.id;

    let writer = {
        let repo = repo.clone();
        tokio::spawn(async move {
            for round in 0..25 {
                let features = if round % 2 == 0 {
                    vec!["Garden".to_string(), "Parking".to_string()]
                } else {
                    vec!["Gym".to_string(), "Pool".to_string()]
                };
                let patch = PropertyPatch {
                    features: Some(features),
                    images: Some(vec![
                        format!("https://img.example.com/{round}-1.jpg"),
                        format!("https://img.example.com/{round}-2.jpg"),
                    ]),
                    ..Default::default()
                };
                repo.update(id, patch).await.unwrap();
                tokio::task::yield_now().await;
            }
        })
    };

    let readers: Vec<_> = (0..3)
        .map(|_| {
            let repo = repo.clone();
            tokio::spawn(async move {
                for _ in 0..25 {
                    let details = repo.find_by_id(id).await.unwrap().unwrap();
                    assert_eq!(details.features.len(), 2, "{:?}", details.features);
                    assert_eq!(details.images.len(), 2, "{:?}", details.images);

                    let listed = repo.list(PropertyFilter::default()).await.unwrap();
                    assert_eq!(listed.len(), 1);
                    assert_eq!(listed[0].features.len(), 2);
                    assert_eq!(listed[0].images.len(), 2);

                    tokio::task::yield_now().await;
                }
            })
        })
        .collect();

    writer.await.unwrap();
    for reader in readers {
        reader.await.unwrap();
    }

    let last = repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(names(&last), vec!["Gym", "Pool"]);
    assert_eq!(last.images[0].image, "https://img.example.com/24-1.jpg");
}

#[sqlx::test]
async fn test_update_missing_property(pool: PgPool) {
    let repo = PgPropertyRepository::new(Arc::new(pool));

    let result = repo.update(424242, PropertyPatch::default()).await;

    assert!(matches!(result, Err(AppError::NotFound { .. })));
}

#[sqlx::test]
async fn test_list_with_filters(pool: PgPool) {
    let alice = common::create_test_user(&pool, "alice@example.com").await;
    let bob = common::create_test_user(&pool, "bob@example.com").await;
    let repo = PgPropertyRepository::new(Arc::new(pool));

    let mut cheap = new_property(alice, "Cheap rent");
    cheap.price = BigDecimal::from(18_000);
    cheap.property_type = PropertyType::Rent;
    repo.create(cheap).await.unwrap();

    let mut pricey = new_property(bob, "Pricey buy");
    pricey.price = BigDecimal::from(12_000_000);
    pricey.city = "Mumbai".to_string();
    repo.create(pricey).await.unwrap();

    let all = repo.list(PropertyFilter::default()).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].property.title, "Pricey buy");

    let by_owner = repo.list(PropertyFilter::by_owner(alice)).await.unwrap();
    assert_eq!(by_owner.len(), 1);
    assert_eq!(by_owner[0].owner.email, "alice@example.com");

    let in_range = repo
        .list(PropertyFilter {
            min_price: Some(BigDecimal::from(10_000)),
            max_price: Some(BigDecimal::from(20_000)),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(in_range.len(), 1);
    assert_eq!(in_range[0].property.title, "Cheap rent");

    let mumbai_rent = repo
        .list(PropertyFilter {
            city: Some("Mumbai".to_string()),
            property_type: Some(PropertyType::Rent),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(mumbai_rent.is_empty());
}

#[sqlx::test]
async fn test_delete_and_exists(pool: PgPool) {
    let owner_id = common::create_test_user(&pool, "owner@example.com").await;
    let id = common::create_test_property(&pool, owner_id, "Flat", "Pune").await;
    let repo = PgPropertyRepository::new(Arc::new(pool));

    assert!(repo.exists(id).await.unwrap());
    assert!(repo.delete(id).await.unwrap());
    assert!(!repo.exists(id).await.unwrap());
    assert!(!repo.delete(id).await.unwrap());
    assert!(repo.find_by_id(id).await.unwrap().is_none());
}
