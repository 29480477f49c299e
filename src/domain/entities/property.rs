//! Property listing entity and its derived attributes.

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{Feature, PropertyImage, User};

/// Listing category. A closed set: anything else is rejected at the
/// validation boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "property_type")]
pub enum PropertyType {
    Buy,
    Rent,
    Commercial,
    PG,
    Plot,
    Luxury,
    ShortStay,
    New,
}

impl PropertyType {
    pub const ALL: [PropertyType; 8] = [
        PropertyType::Buy,
        PropertyType::Rent,
        PropertyType::Commercial,
        PropertyType::PG,
        PropertyType::Plot,
        PropertyType::Luxury,
        PropertyType::ShortStay,
        PropertyType::New,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Buy => "Buy",
            PropertyType::Rent => "Rent",
            PropertyType::Commercial => "Commercial",
            PropertyType::PG => "PG",
            PropertyType::Plot => "Plot",
            PropertyType::Luxury => "Luxury",
            PropertyType::ShortStay => "ShortStay",
            PropertyType::New => "New",
        }
    }

    /// Human-readable label shown in listings.
    pub fn label(&self) -> &'static str {
        match self {
            PropertyType::PG => "PG/Co-living",
            PropertyType::Plot => "Plots/Land",
            PropertyType::ShortStay => "Short Stay",
            PropertyType::New => "New Projects",
            other => other.as_str(),
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the [`PropertyType`] variants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("\"{0}\" is not a valid choice.")]
pub struct InvalidPropertyType(pub String);

impl FromStr for PropertyType {
    type Err = InvalidPropertyType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PropertyType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| InvalidPropertyType(s.to_string()))
    }
}

/// A stored property listing without its relations.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub id: i64,
    pub title: String,
    pub price: BigDecimal,
    pub city: String,
    pub address: String,
    pub area: String,
    pub latitude: Option<BigDecimal>,
    pub longitude: Option<BigDecimal>,
    pub property_type: PropertyType,
    pub description: String,
    pub owner_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Property {
    /// Address, area and city joined with ", ", skipping empty parts.
    /// Falls back to the city alone.
    pub fn full_address(&self) -> String {
        let parts: Vec<&str> = [&self.address, &self.area, &self.city]
            .into_iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect();

        if parts.is_empty() {
            self.city.clone()
        } else {
            parts.join(", ")
        }
    }

    /// True iff both coordinates are present.
    pub fn has_location(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }
}

/// A property with its owner, features and images loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDetails {
    pub property: Property,
    pub owner: User,
    pub features: Vec<Feature>,
    pub images: Vec<PropertyImage>,
}

/// Validated input for creating a property.
///
/// `features` is already normalized; `images` keeps input order.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProperty {
    pub title: String,
    pub price: BigDecimal,
    pub city: String,
    pub address: String,
    pub area: String,
    pub latitude: Option<BigDecimal>,
    pub longitude: Option<BigDecimal>,
    pub property_type: PropertyType,
    pub description: String,
    pub owner_id: i64,
    pub features: Vec<String>,
    pub images: Vec<String>,
}

/// Partial update for a property.
///
/// `None` fields keep their stored value. For coordinates, `Some(None)`
/// clears the value. `features: Some(list)` replaces the whole association,
/// `images: Some(list)` replaces all images. There is no owner field: the
/// owner of a property never changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyPatch {
    pub title: Option<String>,
    pub price: Option<BigDecimal>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub area: Option<String>,
    pub latitude: Option<Option<BigDecimal>>,
    pub longitude: Option<Option<BigDecimal>>,
    pub property_type: Option<PropertyType>,
    pub description: Option<String>,
    pub features: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
}

/// Filters for listing properties. `None` means "no filter".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyFilter {
    pub owner_id: Option<i64>,
    pub city: Option<String>,
    pub property_type: Option<PropertyType>,
    pub min_price: Option<BigDecimal>,
    pub max_price: Option<BigDecimal>,
}

impl PropertyFilter {
    pub fn by_owner(owner_id: i64) -> Self {
        Self {
            owner_id: Some(owner_id),
            ..Default::default()
        }
    }
}
