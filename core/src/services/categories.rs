use serde_json::Value;

use super::Endpoint;
use crate::client::CatalogClient;
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{Category, CategoryInput};

/// Category CRUD over JSON bodies.
#[derive(Debug)]
pub struct CategoryService<T> {
    endpoint: Endpoint<T>,
}

impl<T> Clone for CategoryService<T> {
    fn clone(&self) -> Self {
        Self {
            endpoint: self.endpoint.clone(),
        }
    }
}

impl<T: Transport> CategoryService<T> {
    pub(crate) fn new(endpoint: Endpoint<T>) -> Self {
        Self { endpoint }
    }

    pub async fn list(&self) -> Result<Vec<Category>, ApiError> {
        let request = self.endpoint.client().build_list_categories();
        self.endpoint
            .call("list categories", request, CatalogClient::parse_list_categories)
            .await
    }

    pub async fn get(&self, id: &str) -> Result<Category, ApiError> {
        let request = self.endpoint.client().build_get_category(id);
        self.endpoint
            .call("get category", request, CatalogClient::parse_get_category)
            .await
    }

    pub async fn create(&self, input: &CategoryInput) -> Result<Category, ApiError> {
        let request = self.endpoint.client().build_create_category(input)?;
        self.endpoint
            .call("create category", request, CatalogClient::parse_create_category)
            .await
    }

    pub async fn update(&self, id: &str, input: &CategoryInput) -> Result<Category, ApiError> {
        let request = self.endpoint.client().build_update_category(id, input)?;
        self.endpoint
            .call("update category", request, CatalogClient::parse_update_category)
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<Value, ApiError> {
        let request = self.endpoint.client().build_delete_category(id);
        self.endpoint
            .call("delete category", request, CatalogClient::parse_delete_category)
            .await
    }
}
