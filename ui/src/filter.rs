//! Client-side product filtering for the list page.

use catalog_core::Product;

/// Search term plus optional category; both must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    search: String,
    category: Option<String>,
}

impl ProductFilter {
    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    /// An empty id clears the category filter.
    pub fn set_category(&mut self, id: impl Into<String>) {
        let id = id.into();
        self.category = (!id.is_empty()).then_some(id);
    }

    pub fn is_active(&self) -> bool {
        !self.search.is_empty() || self.category.is_some()
    }

    pub fn matches(&self, product: &Product) -> bool {
        self.matches_search(product) && self.matches_category(product)
    }

    fn matches_search(&self, product: &Product) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let term = self.search.to_lowercase();
        [&product.name, &product.title, &product.description]
            .iter()
            .any(|field| field.to_lowercase().contains(&term))
    }

    fn matches_category(&self, product: &Product) -> bool {
        match &self.category {
            None => true,
            Some(id) => product.category_id() == Some(id.as_str()),
        }
    }

    pub fn apply<'a>(&self, products: impl IntoIterator<Item = &'a Product>) -> Vec<&'a Product> {
        products.into_iter().filter(|p| self.matches(p)).collect()
    }
}
