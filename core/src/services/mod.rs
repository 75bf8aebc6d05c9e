//! Resource services: one async method per domain operation.
//!
//! Each call is build → execute → parse. Failures are logged here and
//! returned unchanged; nothing is retried and no state is kept.

mod categories;
mod products;

use std::sync::Arc;

use tracing::warn;

use crate::client::CatalogClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};

pub use categories::CategoryService;
pub use products::ProductService;

/// One client plus one shared transport; hands out the resource services.
#[derive(Debug)]
pub struct Catalog<T> {
    endpoint: Endpoint<T>,
}

impl<T> Clone for Catalog<T> {
    fn clone(&self) -> Self {
        Self {
            endpoint: self.endpoint.clone(),
        }
    }
}

impl Catalog<UreqTransport> {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(CatalogClient::new(&config.api_base_url), UreqTransport::new())
    }
}

impl<T: Transport> Catalog<T> {
    pub fn new(client: CatalogClient, transport: T) -> Self {
        Self {
            endpoint: Endpoint {
                client,
                transport: Arc::new(transport),
            },
        }
    }

    pub fn client(&self) -> &CatalogClient {
        &self.endpoint.client
    }

    pub fn transport(&self) -> &T {
        &self.endpoint.transport
    }

    pub fn products(&self) -> ProductService<T> {
        ProductService::new(self.endpoint.clone())
    }

    pub fn categories(&self) -> CategoryService<T> {
        CategoryService::new(self.endpoint.clone())
    }
}

#[derive(Debug)]
pub(crate) struct Endpoint<T> {
    client: CatalogClient,
    transport: Arc<T>,
}

impl<T> Clone for Endpoint<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T: Transport> Endpoint<T> {
    pub(crate) async fn call<R>(
        &self,
        operation: &'static str,
        request: HttpRequest,
        parse: fn(&CatalogClient, HttpResponse) -> Result<R, ApiError>,
    ) -> Result<R, ApiError> {
        let result = match self.transport.execute(request).await {
            Ok(response) => parse(&self.client, response),
            Err(err) => Err(err.into()),
        };
        if let Err(err) = &result {
            warn!(operation, error = %err, "catalog request failed");
        }
        result
    }

    pub(crate) fn client(&self) -> &CatalogClient {
        &self.client
    }
}
