//! Pure view-model helpers shared by cards and pages.

use std::borrow::Cow;

use catalog_core::{Category, ClientConfig, Product};
use chrono::{DateTime, Utc};

use crate::route::Route;

pub const DESCRIPTION_LIMIT: usize = 100;
pub const NO_CATEGORY: &str = "No Category";
pub const NO_IMAGES: &str = "No images available";
pub const NO_PRODUCTS: &str = "No products found. Add some products to get started.";
pub const NO_MATCHING_PRODUCTS: &str = "No products found. Try adjusting your filters.";
pub const NO_CATEGORIES: &str = "No categories found. Add some categories to get started.";
pub const PRODUCT_NOT_FOUND: &str = "Product not found.";

/// Cuts at [`DESCRIPTION_LIMIT`] characters and appends `...`.
pub fn truncate_description(description: &str) -> Cow<'_, str> {
    match description.char_indices().nth(DESCRIPTION_LIMIT) {
        Some((cut, _)) => Cow::Owned(format!("{}...", &description[..cut])),
        None => Cow::Borrowed(description),
    }
}

pub fn category_label(product: &Product) -> &str {
    product.category_name().unwrap_or(NO_CATEGORY)
}

/// Short calendar date, e.g. `3/14/2024`.
pub fn format_date(at: &DateTime<Utc>) -> String {
    at.format("%-m/%-d/%Y").to_string()
}

/// Resolves stored image filenames to displayable URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePaths {
    prefix: String,
    placeholder: String,
}

impl Default for ImagePaths {
    fn default() -> Self {
        Self::from_config(&ClientConfig::default())
    }
}

impl ImagePaths {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            prefix: config.uploads_prefix.trim_end_matches('/').to_string(),
            placeholder: config.placeholder_image.clone(),
        }
    }

    pub fn url(&self, filename: &str) -> String {
        format!("{}/{filename}", self.prefix)
    }

    /// First image, or the placeholder when there is none.
    pub fn card_image(&self, product: &Product) -> String {
        product
            .images
            .first()
            .map(|name| self.url(name))
            .unwrap_or_else(|| self.placeholder.clone())
    }

    pub fn gallery(&self, product: &Product) -> Gallery {
        if product.images.is_empty() {
            return Gallery::Empty(NO_IMAGES);
        }
        Gallery::Images(product.images.iter().map(|name| self.url(name)).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gallery {
    Images(Vec<String>),
    Empty(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub id: String,
    pub name: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub image: String,
    pub detail: Route,
    pub edit: Route,
}

impl CardView {
    pub fn new(product: &Product, paths: &ImagePaths) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            title: product.title.clone(),
            description: truncate_description(&product.description).into_owned(),
            category: category_label(product).to_string(),
            image: paths.card_image(product),
            detail: Route::ProductDetail(product.id.clone()),
            edit: Route::ProductEdit(product.id.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDetailView {
    pub name: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub gallery: Gallery,
    pub created: String,
    pub updated: String,
    pub edit: Route,
}

impl ProductDetailView {
    pub fn new(product: &Product, paths: &ImagePaths) -> Self {
        Self {
            name: product.name.clone(),
            title: product.title.clone(),
            description: product.description.clone(),
            category: category_label(product).to_string(),
            gallery: paths.gallery(product),
            created: format_date(&product.created_at),
            updated: format_date(&product.updated_at),
            edit: Route::ProductEdit(product.id.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRow {
    pub id: String,
    pub name: String,
    pub created: Option<String>,
}

impl From<&Category> for CategoryRow {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id.clone(),
            name: category.name.clone(),
            created: category.created_at.as_ref().map(format_date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::CategoryRef;
    use chrono::TimeZone;

    fn product(images: &[&str], category: Option<CategoryRef>) -> Product {
        let at = Utc.with_ymd_and_hms(2024, 3, 14, 9, 30, 0).unwrap();
        Product {
            id: "p1".into(),
            name: "Lamp".into(),
            title: "Desk lamp".into(),
            description: "Warm".into(),
            category,
            images: images.iter().map(|s| s.to_string()).collect(),
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn short_descriptions_are_untouched() {
        let exact = "x".repeat(DESCRIPTION_LIMIT);
        assert_eq!(truncate_description(&exact), exact.as_str());
        assert!(matches!(truncate_description("short"), Cow::Borrowed(_)));
    }

    #[test]
    fn long_descriptions_are_cut_at_100_chars() {
        let long = "y".repeat(DESCRIPTION_LIMIT + 1);
        let out = truncate_description(&long);
        assert_eq!(out.len(), DESCRIPTION_LIMIT + 3);
        assert!(out.ends_with("y..."));
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let long = "é".repeat(120);
        let out = truncate_description(&long);
        assert_eq!(out.chars().count(), DESCRIPTION_LIMIT + 3);
    }

    #[test]
    fn category_label_defaults() {
        assert_eq!(category_label(&product(&[], None)), NO_CATEGORY);
        assert_eq!(category_label(&product(&[], Some(CategoryRef::Id("c1".into())))), NO_CATEGORY);
    }

    #[test]
    fn card_image_uses_first_or_placeholder() {
        let paths = ImagePaths::default();
        assert_eq!(paths.card_image(&product(&["a.png", "b.png"], None)), "/uploads/a.png");
        assert_eq!(
            paths.card_image(&product(&[], None)),
            "https://via.placeholder.com/300x200?text=No+Image"
        );
    }

    #[test]
    fn gallery_lists_every_image() {
        let paths = ImagePaths::default();
        assert_eq!(
            paths.gallery(&product(&["a.png", "b.png"], None)),
            Gallery::Images(vec!["/uploads/a.png".into(), "/uploads/b.png".into()])
        );
        assert_eq!(paths.gallery(&product(&[], None)), Gallery::Empty(NO_IMAGES));
    }

    #[test]
    fn custom_prefix_without_trailing_slash() {
        let config = ClientConfig {
            uploads_prefix: "https://cdn.example/uploads/".into(),
            ..ClientConfig::default()
        };
        let paths = ImagePaths::from_config(&config);
        assert_eq!(paths.url("a.png"), "https://cdn.example/uploads/a.png");
    }

    #[test]
    fn detail_view_formats_dates() {
        let view = ProductDetailView::new(&product(&[], None), &ImagePaths::default());
        assert_eq!(view.created, "3/14/2024");
        assert_eq!(view.edit, Route::ProductEdit("p1".into()));
    }
}
