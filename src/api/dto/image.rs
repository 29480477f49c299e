//! DTOs for property images.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{NewPropertyImage, PropertyImage, PropertyImagePatch};
use crate::error::{AppError, FieldErrors};

/// Image fields as sent to the image collection.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ImageRequest {
    pub property: Option<i64>,
    #[validate(url(message = "Enter a valid URL."))]
    pub image: Option<String>,
}

impl ImageRequest {
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if a field is missing or the URL is invalid.
    pub fn into_new_image(self) -> Result<NewPropertyImage, AppError> {
        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(e) => e.into(),
        };

        if self.property.is_none() {
            errors.add("property", "This field is required.");
        }
        if self.image.is_none() {
            errors.add("image", "This field is required.");
        }

        match (self.property, self.image) {
            (Some(property_id), Some(image)) if errors.is_empty() => Ok(NewPropertyImage {
                property_id,
                image,
            }),
            _ => Err(AppError::fields(errors)),
        }
    }

    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is invalid.
    pub fn into_patch(self) -> Result<PropertyImagePatch, AppError> {
        self.validate()?;

        Ok(PropertyImagePatch {
            property_id: self.property,
            image: self.image,
        })
    }
}

/// Image shape in the image collection.
#[derive(Debug, Serialize)]
pub struct ImageResponse {
    pub id: i64,
    pub property: i64,
    pub image: String,
}

impl From<PropertyImage> for ImageResponse {
    fn from(i: PropertyImage) -> Self {
        Self {
            id: i.id,
            property: i.property_id,
            image: i.image,
        }
    }
}

/// Image shape nested inside a property.
#[derive(Debug, Serialize)]
pub struct NestedImageResponse {
    pub id: i64,
    pub image: String,
}

impl From<PropertyImage> for NestedImageResponse {
    fn from(i: PropertyImage) -> Self {
        Self {
            id: i.id,
            image: i.image,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_image_requires_fields() {
        let err = ImageRequest::default().into_new_image().unwrap_err();
        let fields = err.field_errors().unwrap();
        assert!(fields.contains_key("property"));
        assert!(fields.contains_key("image"));
    }

    #[test]
    fn test_new_image_rejects_bad_url() {
        let req = ImageRequest {
            property: Some(1),
            image: Some("nope".to_string()),
        };
        let err = req.into_new_image().unwrap_err();
        assert_eq!(
            err.field_errors().unwrap()["image"],
            json!(["Enter a valid URL."])
        );
    }

    #[test]
    fn test_patch_allows_partial() {
        let req = ImageRequest {
            property: None,
            image: Some("https://img.example.com/b.jpg".to_string()),
        };
        let patch = req.into_patch().unwrap();
        assert_eq!(patch.property_id, None);
        assert_eq!(patch.image.as_deref(), Some("https://img.example.com/b.jpg"));
    }
}
