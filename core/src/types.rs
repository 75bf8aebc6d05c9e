//! Domain DTOs for the catalog API.
//!
//! # Design
//! Field names follow the backend's JSON (`_id`, camelCase timestamps,
//! `productImage`). These types are defined independently from the
//! mock-server crate; integration tests catch schema drift between the two.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A product category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// How a product refers to its category on read.
///
/// The backend normally embeds the whole category; an unresolved reference
/// arrives as the bare identifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum CategoryRef {
    Embedded(Category),
    Id(String),
}

impl CategoryRef {
    pub fn id(&self) -> &str {
        match self {
            CategoryRef::Embedded(category) => &category.id,
            CategoryRef::Id(id) => id,
        }
    }

    /// Display name, only known when the category is embedded.
    pub fn name(&self) -> Option<&str> {
        match self {
            CategoryRef::Embedded(category) => Some(&category.name),
            CategoryRef::Id(_) => None,
        }
    }
}

/// A catalog product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub category: Option<CategoryRef>,
    /// Stored image filenames, in display order.
    #[serde(rename = "productImage", default)]
    pub images: Vec<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn category_id(&self) -> Option<&str> {
        self.category.as_ref().map(CategoryRef::id)
    }

    pub fn category_name(&self) -> Option<&str> {
        self.category.as_ref().and_then(CategoryRef::name)
    }
}

/// JSON payload for creating or renaming a category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryInput {
    pub name: String,
}

/// A new image file to upload with a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl ImageUpload {
    pub fn new(filename: impl Into<String>, content_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            data,
        }
    }
}

/// Editable product fields plus any new images, sent as multipart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductInput {
    pub name: String,
    pub title: String,
    pub description: String,
    /// Identifier of the selected category.
    pub category: String,
    pub images: Vec<ImageUpload>,
}
