//! Property image entity.

/// A URL reference to an image of a property.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct PropertyImage {
    pub id: i64,
    pub property_id: i64,
    pub image: String,
}

/// Input data for attaching an image to a property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPropertyImage {
    pub property_id: i64,
    pub image: String,
}

/// Partial update for an image. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyImagePatch {
    pub property_id: Option<i64>,
    pub image: Option<String>,
}
