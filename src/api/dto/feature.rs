//! DTOs for amenity features.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::Feature;

/// Create or rename request.
#[derive(Debug, Deserialize, Validate)]
pub struct FeatureRequest {
    #[validate(
        required(message = "This field is required."),
        length(max = 100, message = "Ensure this field has no more than 100 characters.")
    )]
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FeatureResponse {
    pub id: i64,
    pub name: String,
}

impl From<Feature> for FeatureResponse {
    fn from(f: Feature) -> Self {
        Self {
            id: f.id,
            name: f.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use serde_json::json;

    #[test]
    fn test_missing_name() {
        let req: FeatureRequest = serde_json::from_value(json!({})).unwrap();
        let err: AppError = req.validate().unwrap_err().into();
        assert_eq!(
            err.field_errors().unwrap()["name"],
            json!(["This field is required."])
        );
    }

    #[test]
    fn test_name_too_long() {
        let req = FeatureRequest {
            name: Some("x".repeat(101)),
        };
        assert!(req.validate().is_err());

        let req = FeatureRequest {
            name: Some("Sea View".to_string()),
        };
        assert!(req.validate().is_ok());
    }
}
