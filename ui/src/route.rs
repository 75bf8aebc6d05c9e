//! Navigation targets returned by page actions.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Products,
    ProductCreate,
    ProductDetail(String),
    ProductEdit(String),
    Categories,
    CategoryCreate,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Products => "/products".to_string(),
            Route::ProductCreate => "/products/create".to_string(),
            Route::ProductDetail(id) => format!("/products/{id}"),
            Route::ProductEdit(id) => format!("/products/edit/{id}"),
            Route::Categories => "/categories".to_string(),
            Route::CategoryCreate => "/categories/create".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths() {
        assert_eq!(Route::Home.path(), "/");
        assert_eq!(Route::Products.path(), "/products");
        assert_eq!(Route::ProductDetail("p1".into()).path(), "/products/p1");
        assert_eq!(Route::ProductEdit("p1".into()).to_string(), "/products/edit/p1");
        assert_eq!(Route::CategoryCreate.path(), "/categories/create");
    }
}
