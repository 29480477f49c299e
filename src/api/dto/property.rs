//! DTOs for property listings.
//!
//! [`PropertyPayload`] is the shared input shape for create and update; the
//! two entry points differ only in which fields are required.

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::feature::FeatureResponse;
use super::fields::{self, INVALID_INTEGER, INVALID_URL, REQUIRED};
use super::image::NestedImageResponse;
use super::user::OwnerSummary;
use crate::domain::entities::{
    FeatureNames, NewProperty, PropertyDetails, PropertyFilter, PropertyPatch, PropertyType,
};
use crate::error::{AppError, FieldErrors};

const PRICE_DIGITS: u32 = 12;
const PRICE_PLACES: u32 = 2;
const COORD_DIGITS: u32 = 9;
const COORD_PLACES: u32 = 6;
const FEATURE_NAME_MAX: usize = 100;

/// Property fields as sent by clients.
///
/// Decimals accept numbers or numeric strings. `features` accepts a list or
/// a comma-separated string. For coordinates, an explicit `null` is distinct
/// from an absent key so updates can clear them.
#[derive(Debug, Default, Deserialize)]
pub struct PropertyPayload {
    pub title: Option<String>,
    pub price: Option<Value>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub area: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub latitude: Option<Option<Value>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub longitude: Option<Option<Value>>,
    #[serde(rename = "type")]
    pub property_type: Option<String>,
    pub description: Option<String>,
    pub owner: Option<Value>,
    pub features: Option<FeatureNames>,
    pub images: Option<Vec<String>>,
}

impl PropertyPayload {
    /// Reads the owner reference required on create.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `owner` is missing or not an integer.
    pub fn owner_id(&self) -> Result<i64, AppError> {
        match &self.owner {
            None | Some(Value::Null) => Err(AppError::bad_request("Owner is required", json!({}))),
            Some(value) => fields::parse_id(value).ok_or_else(|| {
                AppError::bad_request("Invalid owner id", json!({"owner": value}))
            }),
        }
    }

    /// Validates a create request. `owner_id` must already be resolved.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] with per-field messages.
    pub fn into_new_property(self, owner_id: i64) -> Result<NewProperty, AppError> {
        let mut errors = FieldErrors::new();

        let title = fields::text(&mut errors, "title", self.title, true, Some(255));
        let price = match self.price {
            None | Some(Value::Null) => {
                errors.add("price", REQUIRED);
                None
            }
            Some(v) => fields::decimal(&mut errors, "price", &v, PRICE_DIGITS, PRICE_PLACES),
        };
        let city = fields::text(&mut errors, "city", self.city, true, Some(100));
        let address = fields::text(&mut errors, "address", self.address, false, Some(500));
        let area = fields::text(&mut errors, "area", self.area, false, Some(100));
        let latitude = fields::nullable_decimal(
            &mut errors,
            "latitude",
            self.latitude.flatten(),
            COORD_DIGITS,
            COORD_PLACES,
        );
        let longitude = fields::nullable_decimal(
            &mut errors,
            "longitude",
            self.longitude.flatten(),
            COORD_DIGITS,
            COORD_PLACES,
        );
        let property_type = match self.property_type {
            Some(value) => parse_type(&mut errors, &value),
            None => {
                errors.add("type", REQUIRED);
                None
            }
        };
        let features = feature_names(&mut errors, self.features).unwrap_or_default();
        let images = image_urls(&mut errors, self.images).unwrap_or_default();

        match (title, price, city, property_type) {
            (Some(title), Some(price), Some(city), Some(property_type)) if errors.is_empty() => {
                Ok(NewProperty {
                    title,
                    price,
                    city,
                    address: address.unwrap_or_default(),
                    area: area.unwrap_or_default(),
                    latitude,
                    longitude,
                    property_type,
                    description: self.description.unwrap_or_default(),
                    owner_id,
                    features,
                    images,
                })
            }
            _ => Err(AppError::fields(errors)),
        }
    }

    /// Validates an update request. Every field is optional; `owner` is
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] with per-field messages.
    pub fn into_patch(self) -> Result<PropertyPatch, AppError> {
        let mut errors = FieldErrors::new();

        let title = self
            .title
            .and_then(|v| fields::text(&mut errors, "title", Some(v), true, Some(255)));
        let price = self.price.and_then(|v| {
            fields::decimal(&mut errors, "price", &v, PRICE_DIGITS, PRICE_PLACES)
        });
        let city = self
            .city
            .and_then(|v| fields::text(&mut errors, "city", Some(v), true, Some(100)));
        let address = fields::text(&mut errors, "address", self.address, false, Some(500));
        let area = fields::text(&mut errors, "area", self.area, false, Some(100));
        let latitude = self.latitude.map(|v| {
            fields::nullable_decimal(&mut errors, "latitude", v, COORD_DIGITS, COORD_PLACES)
        });
        let longitude = self.longitude.map(|v| {
            fields::nullable_decimal(&mut errors, "longitude", v, COORD_DIGITS, COORD_PLACES)
        });
        let property_type = self
            .property_type
            .and_then(|v| parse_type(&mut errors, &v));
        let features = feature_names(&mut errors, self.features);
        let images = image_urls(&mut errors, self.images);

        errors.into_result()?;

        Ok(PropertyPatch {
            title,
            price,
            city,
            address,
            area,
            latitude,
            longitude,
            property_type,
            description: self.description,
            features,
            images,
        })
    }
}

fn parse_type(errors: &mut FieldErrors, value: &str) -> Option<PropertyType> {
    match value.parse::<PropertyType>() {
        Ok(t) => Some(t),
        Err(e) => {
            errors.add("type", e.to_string());
            None
        }
    }
}

fn feature_names(errors: &mut FieldErrors, value: Option<FeatureNames>) -> Option<Vec<String>> {
    let names = value?.normalize();

    if names.iter().any(|n| n.chars().count() > FEATURE_NAME_MAX) {
        errors.add("features", fields::max_length_message(FEATURE_NAME_MAX));
        return None;
    }

    Some(names)
}

fn image_urls(errors: &mut FieldErrors, value: Option<Vec<String>>) -> Option<Vec<String>> {
    let urls: Vec<String> = value?
        .into_iter()
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
        .collect();

    if urls.iter().any(|u| !fields::is_http_url(u)) {
        errors.add("images", INVALID_URL);
        return None;
    }

    Some(urls)
}

/// Query parameters for `GET /api/properties`. Empty values are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct PropertyListQuery {
    pub owner: Option<String>,
    pub city: Option<String>,
    #[serde(rename = "type")]
    pub property_type: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
}

impl PropertyListQuery {
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if a non-empty filter is malformed.
    pub fn into_filter(self) -> Result<PropertyFilter, AppError> {
        let mut errors = FieldErrors::new();

        let non_empty = |v: Option<String>| {
            v.map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let owner_id = non_empty(self.owner).and_then(|s| match s.parse::<i64>() {
            Ok(id) => Some(id),
            Err(_) => {
                errors.add("owner", INVALID_INTEGER);
                None
            }
        });
        let property_type =
            non_empty(self.property_type).and_then(|s| parse_type(&mut errors, &s));
        let min_price = non_empty(self.min_price)
            .and_then(|s| fields::decimal(&mut errors, "min_price", &Value::String(s), 14, 2));
        let max_price = non_empty(self.max_price)
            .and_then(|s| fields::decimal(&mut errors, "max_price", &Value::String(s), 14, 2));

        errors.into_result()?;

        Ok(PropertyFilter {
            owner_id,
            city: non_empty(self.city),
            property_type,
            min_price,
            max_price,
        })
    }
}

/// Full property output shape.
#[derive(Debug, Serialize)]
pub struct PropertyResponse {
    pub id: i64,
    pub title: String,
    pub price: BigDecimal,
    pub city: String,
    pub address: String,
    pub area: String,
    pub latitude: Option<BigDecimal>,
    pub longitude: Option<BigDecimal>,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub type_display: &'static str,
    pub description: String,
    pub owner: OwnerSummary,
    pub features: Vec<FeatureResponse>,
    pub images: Vec<NestedImageResponse>,
    pub full_address: String,
    pub has_location: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PropertyDetails> for PropertyResponse {
    fn from(details: PropertyDetails) -> Self {
        let PropertyDetails {
            property,
            owner,
            features,
            images,
        } = details;

        let full_address = property.full_address();
        let has_location = property.has_location();

        Self {
            id: property.id,
            title: property.title,
            price: property.price,
            city: property.city,
            address: property.address,
            area: property.area,
            latitude: property.latitude,
            longitude: property.longitude,
            property_type: property.property_type,
            type_display: property.property_type.label(),
            description: property.description,
            owner: owner.into(),
            features: features.into_iter().map(FeatureResponse::from).collect(),
            images: images.into_iter().map(NestedImageResponse::from).collect(),
            full_address,
            has_location,
            created_at: property.created_at,
            updated_at: property.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn payload(value: Value) -> PropertyPayload {
        serde_json::from_value(value).unwrap()
    }

    fn valid() -> Value {
        json!({
            "title": "Sea-facing 2BHK",
            "price": "4500000",
            "city": "Mumbai",
            "type": "Buy",
            "owner": 1
        })
    }

    #[test]
    fn test_owner_id_forms() {
        assert_eq!(payload(valid()).owner_id().unwrap(), 1);
        assert_eq!(payload(json!({"owner": "7"})).owner_id().unwrap(), 7);

        let err = payload(json!({})).owner_id().unwrap_err();
        assert_eq!(err.to_string(), "Owner is required");
        assert!(err.field_errors().is_none());

        let err = payload(json!({"owner": "abc"})).owner_id().unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[test]
    fn test_minimal_create() {
        let new = payload(valid()).into_new_property(1).unwrap();

        assert_eq!(new.title, "Sea-facing 2BHK");
        assert_eq!(new.price, BigDecimal::from(4_500_000));
        assert_eq!(new.property_type, PropertyType::Buy);
        assert_eq!(new.address, "");
        assert!(new.latitude.is_none());
        assert!(new.features.is_empty());
        assert!(new.images.is_empty());
    }

    #[test]
    fn test_create_reports_all_missing_fields() {
        let err = payload(json!({"owner": 1})).into_new_property(1).unwrap_err();
        let fields = err.field_errors().unwrap();

        for field in ["title", "price", "city", "type"] {
            assert_eq!(fields[field], json!([REQUIRED]), "{field}");
        }
    }

    #[test]
    fn test_invalid_type_rejected() {
        let mut body = valid();
        body["type"] = json!("Villa");

        let err = payload(body).into_new_property(1).unwrap_err();
        assert_eq!(
            err.field_errors().unwrap()["type"],
            json!(["\"Villa\" is not a valid choice."])
        );
    }

    #[test]
    fn test_invalid_price_rejected() {
        let mut body = valid();
        body["price"] = json!("cheap");

        let err = payload(body).into_new_property(1).unwrap_err();
        assert_eq!(
            err.field_errors().unwrap()["price"],
            json!([fields::INVALID_NUMBER])
        );
    }

    #[test]
    fn test_csv_and_list_features_match() {
        let mut csv = valid();
        csv["features"] = json!("Gym, Pool");
        let mut list = valid();
        list["features"] = json!(["Gym", "Pool"]);

        let a = payload(csv).into_new_property(1).unwrap();
        let b = payload(list).into_new_property(1).unwrap();

        assert_eq!(a.features, vec!["Gym", "Pool"]);
        assert_eq!(a.features, b.features);
    }

    #[test]
    fn test_coordinates_as_numbers() {
        let mut body = valid();
        body["latitude"] = json!(19.07609);
        body["longitude"] = json!("72.877426");

        let new = payload(body).into_new_property(1).unwrap();
        assert_eq!(new.latitude, BigDecimal::from_str("19.07609").ok());
        assert_eq!(new.longitude, BigDecimal::from_str("72.877426").ok());
    }

    #[test]
    fn test_invalid_image_url() {
        let mut body = valid();
        body["images"] = json!(["https://img.example.com/a.jpg", "not a url"]);

        let err = payload(body).into_new_property(1).unwrap_err();
        assert!(err.field_errors().unwrap().contains_key("images"));
    }

    #[test]
    fn test_patch_distinguishes_absent_and_null() {
        let patch = payload(json!({"title": "New"})).into_patch().unwrap();
        assert_eq!(patch.title.as_deref(), Some("New"));
        assert!(patch.latitude.is_none());
        assert!(patch.features.is_none());
        assert!(patch.images.is_none());

        let patch = payload(json!({"latitude": null, "features": []}))
            .into_patch()
            .unwrap();
        assert_eq!(patch.latitude, Some(None));
        assert_eq!(patch.features, Some(vec![]));
    }

    #[test]
    fn test_patch_ignores_owner() {
        let patch = payload(json!({"owner": 999})).into_patch().unwrap();
        assert_eq!(patch, PropertyPatch::default());
    }

    #[test]
    fn test_patch_rejects_blank_title() {
        let err = payload(json!({"title": "  "})).into_patch().unwrap_err();
        assert_eq!(
            err.field_errors().unwrap()["title"],
            json!([fields::BLANK])
        );
    }

    #[test]
    fn test_list_query_ignores_empty_values() {
        let query = PropertyListQuery {
            owner: Some(String::new()),
            city: Some("  ".to_string()),
            property_type: Some(String::new()),
            min_price: None,
            max_price: Some(String::new()),
        };

        assert_eq!(query.into_filter().unwrap(), PropertyFilter::default());
    }

    #[test]
    fn test_list_query_parses_filters() {
        let query = PropertyListQuery {
            owner: Some("3".to_string()),
            city: Some("Pune".to_string()),
            property_type: Some("Rent".to_string()),
            min_price: Some("1000".to_string()),
            max_price: Some("50000.50".to_string()),
        };

        let filter = query.into_filter().unwrap();
        assert_eq!(filter.owner_id, Some(3));
        assert_eq!(filter.city.as_deref(), Some("Pune"));
        assert_eq!(filter.property_type, Some(PropertyType::Rent));
        assert_eq!(filter.min_price, Some(BigDecimal::from(1000)));
    }

    #[test]
    fn test_list_query_rejects_bad_owner() {
        let query = PropertyListQuery {
            owner: Some("me".to_string()),
            ..Default::default()
        };

        let err = query.into_filter().unwrap_err();
        assert!(err.field_errors().unwrap().contains_key("owner"));
    }
}
