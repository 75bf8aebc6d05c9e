//! Stateless HTTP request builder and response parser for the catalog API.
//!
//! # Design
//! `CatalogClient` holds only a base URL (including the `/api` base path) and
//! carries no mutable state between calls. Each CRUD operation is split into
//! a `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`. Executing the round-trip is the
//! transport's job, keeping this layer deterministic.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ApiError, ErrorPayload};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::multipart::MultipartForm;
use crate::types::{Category, CategoryInput, Product, ProductInput};

const JSON_CONTENT_TYPE: &str = "application/json";

/// Multipart field shared by every uploaded product image.
pub const IMAGE_FIELD: &str = "productImage";

/// Multipart field listing the stored images an update keeps.
pub const EXISTING_IMAGES_FIELD: &str = "existingImages";

/// Synchronous, stateless client for the catalog API.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn bodiless(&self, method: HttpMethod, path: &str) -> HttpRequest {
        HttpRequest {
            method,
            path: self.url(path),
            headers: Vec::new(),
            body: None,
        }
    }

    fn json(&self, method: HttpMethod, path: &str, input: &CategoryInput) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_vec(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method,
            path: self.url(path),
            headers: vec![("content-type".to_string(), JSON_CONTENT_TYPE.to_string())],
            body: Some(body),
        })
    }

    fn multipart(&self, method: HttpMethod, path: &str, form: MultipartForm) -> HttpRequest {
        HttpRequest {
            method,
            path: self.url(path),
            headers: vec![("content-type".to_string(), form.content_type())],
            body: Some(form.encode()),
        }
    }

    // --- categories ---

    pub fn build_list_categories(&self) -> HttpRequest {
        self.bodiless(HttpMethod::Get, "/categories")
    }

    pub fn build_get_category(&self, id: &str) -> HttpRequest {
        self.bodiless(HttpMethod::Get, &format!("/categories/{id}"))
    }

    pub fn build_create_category(&self, input: &CategoryInput) -> Result<HttpRequest, ApiError> {
        self.json(HttpMethod::Post, "/categories", input)
    }

    pub fn build_update_category(&self, id: &str, input: &CategoryInput) -> Result<HttpRequest, ApiError> {
        self.json(HttpMethod::Put, &format!("/categories/{id}"), input)
    }

    pub fn build_delete_category(&self, id: &str) -> HttpRequest {
        self.bodiless(HttpMethod::Delete, &format!("/categories/{id}"))
    }

    pub fn parse_list_categories(&self, response: HttpResponse) -> Result<Vec<Category>, ApiError> {
        decode(response)
    }

    pub fn parse_get_category(&self, response: HttpResponse) -> Result<Category, ApiError> {
        decode(response)
    }

    pub fn parse_create_category(&self, response: HttpResponse) -> Result<Category, ApiError> {
        decode(response)
    }

    pub fn parse_update_category(&self, response: HttpResponse) -> Result<Category, ApiError> {
        decode(response)
    }

    pub fn parse_delete_category(&self, response: HttpResponse) -> Result<Value, ApiError> {
        decode_loose(response)
    }

    // --- products ---

    pub fn build_list_products(&self) -> HttpRequest {
        self.bodiless(HttpMethod::Get, "/products")
    }

    pub fn build_get_product(&self, id: &str) -> HttpRequest {
        self.bodiless(HttpMethod::Get, &format!("/products/{id}"))
    }

    pub fn build_create_product(&self, input: &ProductInput) -> HttpRequest {
        self.build_create_product_with(input, MultipartForm::new())
    }

    /// Same as [`build_create_product`](Self::build_create_product) but
    /// appends to a caller-provided (typically fixed-boundary) form.
    pub fn build_create_product_with(&self, input: &ProductInput, form: MultipartForm) -> HttpRequest {
        self.multipart(HttpMethod::Post, "/products", product_form(form, input, None))
    }

    pub fn build_update_product(&self, id: &str, input: &ProductInput, existing_images: &[String]) -> HttpRequest {
        self.build_update_product_with(id, input, existing_images, MultipartForm::new())
    }

    pub fn build_update_product_with(
        &self,
        id: &str,
        input: &ProductInput,
        existing_images: &[String],
        form: MultipartForm,
    ) -> HttpRequest {
        self.multipart(
            HttpMethod::Put,
            &format!("/products/{id}"),
            product_form(form, input, Some(existing_images)),
        )
    }

    pub fn build_delete_product(&self, id: &str) -> HttpRequest {
        self.bodiless(HttpMethod::Delete, &format!("/products/{id}"))
    }

    pub fn parse_list_products(&self, response: HttpResponse) -> Result<Vec<Product>, ApiError> {
        decode(response)
    }

    /// A successful answer with no record (`null` or empty) is `None`.
    pub fn parse_get_product(&self, response: HttpResponse) -> Result<Option<Product>, ApiError> {
        decode_optional(response)
    }

    pub fn parse_create_product(&self, response: HttpResponse) -> Result<Product, ApiError> {
        decode(response)
    }

    pub fn parse_update_product(&self, response: HttpResponse) -> Result<Product, ApiError> {
        decode(response)
    }

    pub fn parse_delete_product(&self, response: HttpResponse) -> Result<Value, ApiError> {
        decode_loose(response)
    }
}

/// Scalar fields first, then one part per new image under `productImage`.
fn product_form(form: MultipartForm, input: &ProductInput, existing_images: Option<&[String]>) -> MultipartForm {
    let mut form = form
        .text("name", input.name.as_str())
        .text("title", input.title.as_str())
        .text("description", input.description.as_str())
        .text("category", input.category.as_str());
    if let Some(existing) = existing_images {
        form = form.text(EXISTING_IMAGES_FIELD, existing.join(","));
    }
    for image in &input.images {
        form = form.file(
            IMAGE_FIELD,
            image.filename.as_str(),
            image.content_type.as_str(),
            image.data.clone(),
        );
    }
    form
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    let payload = ErrorPayload::from_body(&response.body);
    if response.status == 404 {
        return Err(ApiError::NotFound { payload });
    }
    Err(ApiError::Server {
        status: response.status,
        payload,
    })
}

fn decode<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

fn decode_optional<T: DeserializeOwned>(response: HttpResponse) -> Result<Option<T>, ApiError> {
    check_status(&response)?;
    if response.body.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Decode a body whose shape the backend leaves open; empty means `Null`.
fn decode_loose(response: HttpResponse) -> Result<Value, ApiError> {
    check_status(&response)?;
    if response.body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ImageUpload;

    fn client() -> CatalogClient {
        CatalogClient::new("http://localhost:3000/api")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            body: body.to_string(),
        }
    }

    fn input() -> ProductInput {
        ProductInput {
            name: "Lamp".to_string(),
            title: "Desk lamp".to_string(),
            description: "Warm light".to_string(),
            category: "c1".to_string(),
            images: vec![
                ImageUpload::new("a.png", "image/png", vec![1]),
                ImageUpload::new("b.jpg", "image/jpeg", vec![2]),
            ],
        }
    }

    #[test]
    fn build_list_categories_produces_correct_request() {
        let req = client().build_list_categories();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/api/categories");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_create_category_sends_json_name() {
        let req = client()
            .build_create_category(&CategoryInput {
                name: "Tools".to_string(),
            })
            .unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.header("Content-Type"), Some("application/json"));
        let body: Value = serde_json::from_slice(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"name": "Tools"}));
    }

    #[test]
    fn build_update_category_targets_id() {
        let req = client()
            .build_update_category("c1", &CategoryInput {
                name: "Renamed".to_string(),
            })
            .unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:3000/api/categories/c1");
    }

    #[test]
    fn build_create_product_is_multipart_with_one_part_per_image() {
        let form = MultipartForm::with_boundary("B");
        let req = client().build_create_product_with(&input(), form);
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/api/products");
        assert_eq!(req.header("content-type"), Some("multipart/form-data; boundary=B"));

        let body = String::from_utf8_lossy(req.body.as_deref().unwrap()).to_string();
        assert_eq!(body.matches("name=\"productImage\"").count(), 2);
        assert!(body.contains("name=\"category\"\r\n\r\nc1\r\n"));
        assert!(!body.contains(EXISTING_IMAGES_FIELD));
    }

    #[test]
    fn build_update_product_joins_existing_images() {
        let existing = vec!["old1.png".to_string(), "old2.png".to_string()];
        let req = client().build_update_product_with("p1", &input(), &existing, MultipartForm::with_boundary("B"));
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:3000/api/products/p1");
        let body = String::from_utf8_lossy(req.body.as_deref().unwrap()).to_string();
        assert!(body.contains("name=\"existingImages\"\r\n\r\nold1.png,old2.png\r\n"));
    }

    #[test]
    fn build_update_product_with_no_kept_images_sends_empty_field() {
        let req = client().build_update_product_with("p1", &ProductInput::default(), &[], MultipartForm::with_boundary("B"));
        let body = String::from_utf8_lossy(req.body.as_deref().unwrap()).to_string();
        assert!(body.contains("name=\"existingImages\"\r\n\r\n\r\n"));
    }

    #[test]
    fn parse_list_categories_success() {
        let cats = client()
            .parse_list_categories(response(200, r#"[{"_id":"c1","name":"Tools"}]"#))
            .unwrap();
        assert_eq!(cats.len(), 1);
        assert_eq!(cats[0].name, "Tools");
    }

    #[test]
    fn parse_create_accepts_any_2xx() {
        let cat = client()
            .parse_create_category(response(201, r#"{"_id":"c1","name":"Tools"}"#))
            .unwrap();
        assert_eq!(cat.id, "c1");
    }

    #[test]
    fn parse_get_product_not_found_keeps_payload() {
        let err = client()
            .parse_get_product(response(404, r#"{"message":"Product not found"}"#))
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.server_message().as_deref(), Some("Product not found"));
    }

    #[test]
    fn parse_get_product_without_record_is_none() {
        assert_eq!(client().parse_get_product(response(200, "null")).unwrap(), None);
        assert_eq!(client().parse_get_product(response(200, "")).unwrap(), None);
        let product = client()
            .parse_get_product(response(
                200,
                r#"{"_id":"p1","name":"Lamp","title":"Desk lamp","description":"Warm light",
                    "createdAt":"2024-03-01T10:00:00Z","updatedAt":"2024-03-01T10:00:00Z"}"#,
            ))
            .unwrap()
            .unwrap();
        assert_eq!(product.id, "p1");
    }

    #[test]
    fn parse_create_product_server_rejection() {
        let err = client()
            .parse_create_product(response(400, r#"{"message":"Category not found"}"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::Server { status: 400, .. }));
        assert_eq!(err.describe(), "Error 400: Category not found");
    }

    #[test]
    fn parse_delete_empty_body_is_null() {
        let value = client().parse_delete_product(response(204, "")).unwrap();
        assert_eq!(value, Value::Null);
    }

    #[test]
    fn parse_delete_returns_body_verbatim() {
        let value = client()
            .parse_delete_category(response(200, r#"{"message":"Category deleted"}"#))
            .unwrap();
        assert_eq!(value["message"], "Category deleted");
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = CatalogClient::new("http://localhost:3000/api/");
        assert_eq!(client.build_list_products().path, "http://localhost:3000/api/products");
    }

    #[test]
    fn parse_list_products_bad_json() {
        let err = client().parse_list_products(response(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }
}
