//! In-memory catalog backend used for integration tests and local runs.
//!
//! Serves the REST API under `/api` and uploaded images under `/uploads`.
//! Products reference categories by id and are returned with the category
//! embedded; a product whose category was deleted comes back with
//! `category: null`.

use std::{collections::HashMap, sync::Arc};

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub title: String,
    pub description: String,
    pub category: Option<Category>,
    #[serde(rename = "productImage")]
    pub images: Vec<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct CategoryInput {
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

#[derive(Clone, Debug)]
struct StoredProduct {
    id: String,
    name: String,
    title: String,
    description: String,
    category: String,
    images: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug)]
struct Upload {
    content_type: String,
    data: Bytes,
}

/// Records are kept in insertion order and listed newest first.
#[derive(Default, Debug)]
pub struct Store {
    categories: Vec<Category>,
    products: Vec<StoredProduct>,
    uploads: HashMap<String, Upload>,
}

impl Store {
    fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    fn resolve(&self, product: &StoredProduct) -> Product {
        Product {
            id: product.id.clone(),
            name: product.name.clone(),
            title: product.title.clone(),
            description: product.description.clone(),
            category: self.category(&product.category).cloned(),
            images: product.images.clone(),
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

pub type Db = Arc<RwLock<Store>>;

type ApiResult<T> = Result<T, (StatusCode, Json<ErrorBody>)>;

fn reject(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<ErrorBody>) {
    (
        status,
        Json(ErrorBody {
            message: message.into(),
        }),
    )
}

/// Request body cap; product uploads carry several full-size photos.
pub const BODY_LIMIT: usize = 20 * 1024 * 1024;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    let api = Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route(
            "/categories/{id}",
            get(get_category).put(update_category).delete(delete_category),
        )
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        );
    Router::new()
        .nest("/api", api)
        .route("/uploads/{filename}", get(get_upload))
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "catalog mock server listening");
    }
    axum::serve(listener, app()).await
}

// --- categories ---

async fn list_categories(State(db): State<Db>) -> Json<Vec<Category>> {
    let store = db.read().await;
    Json(store.categories.iter().rev().cloned().collect())
}

async fn get_category(State(db): State<Db>, Path(id): Path<String>) -> ApiResult<Json<Category>> {
    let store = db.read().await;
    store
        .category(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "Category not found"))
}

async fn create_category(
    State(db): State<Db>,
    Json(input): Json<CategoryInput>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(reject(StatusCode::BAD_REQUEST, "Category name is required"));
    }
    let now = Utc::now();
    let category = Category {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        created_at: now,
        updated_at: now,
    };
    db.write().await.categories.push(category.clone());
    debug!(id = %category.id, "category created");
    Ok((StatusCode::CREATED, Json(category)))
}

async fn update_category(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<CategoryInput>,
) -> ApiResult<Json<Category>> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(reject(StatusCode::BAD_REQUEST, "Category name is required"));
    }
    let mut store = db.write().await;
    let category = store
        .categories
        .iter_mut()
        .find(|c| c.id == id)
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "Category not found"))?;
    category.name = name.to_string();
    category.updated_at = Utc::now();
    Ok(Json(category.clone()))
}

async fn delete_category(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> ApiResult<Json<ErrorBody>> {
    let mut store = db.write().await;
    let before = store.categories.len();
    store.categories.retain(|c| c.id != id);
    if store.categories.len() == before {
        return Err(reject(StatusCode::NOT_FOUND, "Category not found"));
    }
    Ok(Json(ErrorBody {
        message: "Category deleted".to_string(),
    }))
}

// --- products ---

async fn list_products(State(db): State<Db>) -> Json<Vec<Product>> {
    let store = db.read().await;
    Json(store.products.iter().rev().map(|p| store.resolve(p)).collect())
}

async fn get_product(State(db): State<Db>, Path(id): Path<String>) -> ApiResult<Json<Product>> {
    let store = db.read().await;
    store
        .products
        .iter()
        .find(|p| p.id == id)
        .map(|p| Json(store.resolve(p)))
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "Product not found"))
}

/// Fields decoded from a product multipart body.
#[derive(Default)]
struct ProductForm {
    fields: HashMap<String, String>,
    uploads: Vec<(String, Upload)>,
}

impl ProductForm {
    async fn read(mut multipart: Multipart) -> ApiResult<Self> {
        let mut form = ProductForm::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| reject(StatusCode::BAD_REQUEST, e.body_text()))?
        {
            let name = field.name().unwrap_or_default().to_string();
            if name == "productImage" {
                let original = field.file_name().unwrap_or("upload").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| reject(StatusCode::BAD_REQUEST, e.body_text()))?;
                if data.is_empty() {
                    continue;
                }
                let stored = format!("{}-{}", Uuid::new_v4().simple(), sanitize(&original));
                form.uploads.push((stored, Upload { content_type, data }));
            } else {
                let value = field
                    .text()
                    .await
                    .map_err(|e| reject(StatusCode::BAD_REQUEST, e.body_text()))?;
                form.fields.insert(name, value);
            }
        }
        Ok(form)
    }

    fn required(&self, key: &str) -> ApiResult<String> {
        match self.fields.get(key).map(|v| v.trim()) {
            Some(v) if !v.is_empty() => Ok(v.to_string()),
            _ => Err(reject(StatusCode::BAD_REQUEST, format!("{key} is required"))),
        }
    }

    fn existing_images(&self) -> Option<Vec<String>> {
        self.fields.get("existingImages").map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
    }
}

fn sanitize(filename: &str) -> String {
    filename
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

async fn create_product(
    State(db): State<Db>,
    multipart: Multipart,
) -> ApiResult<(StatusCode, Json<Product>)> {
    let form = ProductForm::read(multipart).await?;
    let name = form.required("name")?;
    let title = form.required("title")?;
    let description = form.required("description")?;
    let category = form.required("category")?;

    let mut store = db.write().await;
    if store.category(&category).is_none() {
        return Err(reject(StatusCode::BAD_REQUEST, "Category not found"));
    }
    let now = Utc::now();
    let mut images = Vec::new();
    for (stored, upload) in form.uploads {
        images.push(stored.clone());
        store.uploads.insert(stored, upload);
    }
    let product = StoredProduct {
        id: Uuid::new_v4().to_string(),
        name,
        title,
        description,
        category,
        images,
        created_at: now,
        updated_at: now,
    };
    let body = store.resolve(&product);
    store.products.push(product);
    debug!(id = %body.id, "product created");
    Ok((StatusCode::CREATED, Json(body)))
}

async fn update_product(
    State(db): State<Db>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> ApiResult<Json<Product>> {
    let form = ProductForm::read(multipart).await?;
    let name = form.required("name")?;
    let title = form.required("title")?;
    let description = form.required("description")?;
    let category = form.required("category")?;

    let mut store = db.write().await;
    if store.category(&category).is_none() {
        return Err(reject(StatusCode::BAD_REQUEST, "Category not found"));
    }
    let index = store
        .products
        .iter()
        .position(|p| p.id == id)
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "Product not found"))?;

    let current = store.products[index].images.clone();
    let kept: Vec<String> = match form.existing_images() {
        Some(keep) => current.iter().filter(|img| keep.contains(img)).cloned().collect(),
        None => current.clone(),
    };
    for dropped in current.iter().filter(|img| !kept.contains(img)) {
        store.uploads.remove(dropped);
    }
    let mut images = kept;
    for (stored, upload) in form.uploads {
        images.push(stored.clone());
        store.uploads.insert(stored, upload);
    }

    let product = &mut store.products[index];
    product.name = name;
    product.title = title;
    product.description = description;
    product.category = category;
    product.images = images;
    product.updated_at = Utc::now();
    let product = product.clone();
    Ok(Json(store.resolve(&product)))
}

async fn delete_product(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> ApiResult<Json<ErrorBody>> {
    let mut store = db.write().await;
    let index = store
        .products
        .iter()
        .position(|p| p.id == id)
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "Product not found"))?;
    let removed = store.products.remove(index);
    for image in &removed.images {
        store.uploads.remove(image);
    }
    Ok(Json(ErrorBody {
        message: "Product deleted".to_string(),
    }))
}

// --- uploads ---

async fn get_upload(
    State(db): State<Db>,
    Path(filename): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let store = db.read().await;
    let upload = store
        .uploads
        .get(&filename)
        .cloned()
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "Image not found"))?;
    Ok(([(header::CONTENT_TYPE, upload.content_type)], upload.data))
}
