use serde_json::Value;

use super::Endpoint;
use crate::client::CatalogClient;
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{Product, ProductInput};

/// Product CRUD; create and update upload multipart bodies.
#[derive(Debug)]
pub struct ProductService<T> {
    endpoint: Endpoint<T>,
}

impl<T> Clone for ProductService<T> {
    fn clone(&self) -> Self {
        Self {
            endpoint: self.endpoint.clone(),
        }
    }
}

impl<T: Transport> ProductService<T> {
    pub(crate) fn new(endpoint: Endpoint<T>) -> Self {
        Self { endpoint }
    }

    pub async fn list(&self) -> Result<Vec<Product>, ApiError> {
        let request = self.endpoint.client().build_list_products();
        self.endpoint
            .call("list products", request, CatalogClient::parse_list_products)
            .await
    }

    /// `Ok(None)` when the server answers successfully without a record.
    pub async fn get(&self, id: &str) -> Result<Option<Product>, ApiError> {
        let request = self.endpoint.client().build_get_product(id);
        self.endpoint
            .call("get product", request, CatalogClient::parse_get_product)
            .await
    }

    pub async fn create(&self, input: &ProductInput) -> Result<Product, ApiError> {
        let request = self.endpoint.client().build_create_product(input);
        self.endpoint
            .call("create product", request, CatalogClient::parse_create_product)
            .await
    }

    /// Full replace of the editable fields. `existing_images` lists the
    /// stored filenames to keep; `input.images` are appended as new uploads.
    pub async fn update(
        &self,
        id: &str,
        input: &ProductInput,
        existing_images: &[String],
    ) -> Result<Product, ApiError> {
        let request = self
            .endpoint
            .client()
            .build_update_product(id, input, existing_images);
        self.endpoint
            .call("update product", request, CatalogClient::parse_update_product)
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<Value, ApiError> {
        let request = self.endpoint.client().build_delete_product(id);
        self.endpoint
            .call("delete product", request, CatalogClient::parse_delete_product)
            .await
    }
}
