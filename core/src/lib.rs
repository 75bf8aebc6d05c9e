//! API client core for the product/category catalog backend.
//!
//! # Overview
//! `CatalogClient` builds `HttpRequest` values and parses `HttpResponse`
//! values without touching the network. A `Transport` executes the actual
//! round-trip, and the resource services (`ProductService`,
//! `CategoryService`) tie the two together into one async call per domain
//! operation.
//!
//! # Design
//! - `CatalogClient` is stateless; it holds only the base URL.
//! - Each CRUD operation is split into `build_*` and `parse_*`, so the I/O
//!   boundary is explicit and testable with canned responses.
//! - Categories travel as JSON; products as `multipart/form-data` so images
//!   can ride along with the scalar fields.
//! - Errors normalize to the server payload when a response arrived,
//!   otherwise to the transport message.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod multipart;
pub mod services;
pub mod transport;
pub mod types;

pub use client::CatalogClient;
pub use config::{ClientConfig, ConfigError};
pub use error::{ApiError, ErrorPayload, TransportError, CONNECTIVITY_MESSAGE};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use multipart::{MultipartForm, Part};
pub use services::{Catalog, CategoryService, ProductService};
pub use transport::{Transport, UreqTransport};
pub use types::{Category, CategoryInput, CategoryRef, ImageUpload, Product, ProductInput};
