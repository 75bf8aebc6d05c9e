use catalog_core::{Catalog, Product, ProductService, Transport};
use tracing::warn;

use crate::delete::{DeleteOutcome, DeleteWorkflow};
use crate::present::{ImagePaths, ProductDetailView, PRODUCT_NOT_FOUND};
use crate::route::Route;
use crate::scope::ViewScope;
use crate::state::PageState;

const LOAD_FAILED: &str = "Failed to fetch product details. Please try again later.";

/// One product with its gallery, plus edit and delete actions.
#[derive(Debug)]
pub struct ProductDetailPage<T> {
    id: String,
    products: ProductService<T>,
    scope: ViewScope,
    paths: ImagePaths,
    state: PageState<Product>,
    delete: DeleteWorkflow<Product>,
}

impl<T: Transport> ProductDetailPage<T> {
    pub fn new(catalog: &Catalog<T>, paths: ImagePaths, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            products: catalog.products(),
            scope: ViewScope::new(),
            paths,
            state: PageState::Loading,
            delete: DeleteWorkflow::new(),
        }
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    pub fn state(&self) -> &PageState<Product> {
        &self.state
    }

    pub async fn load(&mut self) {
        self.state = PageState::Loading;
        let Some(result) = self.scope.run(self.products.get(&self.id)).await else {
            return;
        };
        if let Err(err) = &result {
            warn!(page = "product_detail", id = %self.id, error = %err, "failed to load product");
        }
        self.state = PageState::settle_record(result, LOAD_FAILED);
    }

    pub fn view(&self) -> Option<ProductDetailView> {
        self.state
            .ready()
            .map(|product| ProductDetailView::new(product, &self.paths))
    }

    /// Text shown in place of the product when it is missing or failed.
    pub fn notice(&self) -> Option<&str> {
        match &self.state {
            PageState::NotFound => Some(PRODUCT_NOT_FOUND),
            other => other.error(),
        }
    }

    pub fn delete_workflow(&self) -> &DeleteWorkflow<Product> {
        &self.delete
    }

    pub fn request_delete(&mut self) {
        if let Some(product) = self.state.ready() {
            self.delete.request(product.clone());
        }
    }

    pub fn cancel_delete(&mut self) {
        self.delete.cancel();
    }

    /// Deletes the product and, on success, returns the product list route.
    pub async fn confirm_delete(&mut self) -> Option<Route> {
        let products = &self.products;
        let outcome = self
            .delete
            .confirm(&self.scope, |id| async move { products.delete(&id).await })
            .await;
        match outcome {
            DeleteOutcome::Deleted(_) => Some(Route::Products),
            _ => None,
        }
    }

    /// Target of the "back to products" action, also offered when the
    /// product is missing or failed to load.
    pub fn back(&self) -> Route {
        Route::Products
    }

    pub fn edit(&self) -> Route {
        Route::ProductEdit(self.id.clone())
    }

    pub fn unmount(&self) {
        self.scope.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::present::Gallery;
    use crate::testing::{product_json, ScriptedTransport};
    use catalog_core::CONNECTIVITY_MESSAGE;

    async fn loaded(transport: &ScriptedTransport) -> ProductDetailPage<ScriptedTransport> {
        let mut page = ProductDetailPage::new(&transport.catalog(), ImagePaths::default(), "p1");
        page.load().await;
        page
    }

    #[tokio::test]
    async fn shows_product_with_gallery() {
        let transport = ScriptedTransport::default();
        transport.reply(200, &product_json("p1", "Lamp", Some("c1")));
        let page = loaded(&transport).await;

        let view = page.view().unwrap();
        assert_eq!(view.category, "Tools");
        assert_eq!(view.gallery, Gallery::Images(vec!["/uploads/p1.png".to_string()]));
        assert_eq!(transport.sent()[0].path, "http://test/api/products/p1");
    }

    #[tokio::test]
    async fn missing_product_is_not_an_error() {
        let transport = ScriptedTransport::default();
        transport.reply(404, &format!(r#"{{"message":"{PRODUCT_NOT_FOUND}"}}"#));
        let page = loaded(&transport).await;
        assert_eq!(page.state(), &PageState::NotFound);
        assert_eq!(page.notice(), Some(PRODUCT_NOT_FOUND));
        assert_eq!(page.back(), Route::Products);
    }

    #[tokio::test]
    async fn empty_success_is_not_found() {
        let transport = ScriptedTransport::default();
        transport.reply(200, "null");
        let page = loaded(&transport).await;
        assert_eq!(page.state(), &PageState::NotFound);
        assert_eq!(page.notice(), Some(PRODUCT_NOT_FOUND));
        assert!(page.view().is_none());
    }

    #[tokio::test]
    async fn transport_failure_shows_connectivity_message() {
        let transport = ScriptedTransport::default();
        transport.unreachable();
        let page = loaded(&transport).await;
        assert_eq!(page.state().error(), Some(CONNECTIVITY_MESSAGE));
        assert_eq!(page.notice(), Some(CONNECTIVITY_MESSAGE));
        assert!(page.view().is_none());
    }

    #[tokio::test]
    async fn confirmed_delete_navigates_to_products() {
        let transport = ScriptedTransport::default();
        transport
            .reply(200, &product_json("p1", "Lamp", None))
            .reply(200, r#"{"message":"Product deleted"}"#);
        let mut page = loaded(&transport).await;

        page.request_delete();
        assert_eq!(
            page.delete_workflow().prompt().as_deref(),
            Some("Are you sure you want to delete \"Lamp\"? This action cannot be undone.")
        );
        assert_eq!(page.confirm_delete().await, Some(Route::Products));
    }

    #[tokio::test]
    async fn failed_delete_stays_on_page() {
        let transport = ScriptedTransport::default();
        transport.reply(200, &product_json("p1", "Lamp", None)).reply(500, "");
        let mut page = loaded(&transport).await;

        page.request_delete();
        assert_eq!(page.confirm_delete().await, None);
        assert!(page.view().is_some());
        assert!(page.delete_workflow().error().is_some());
    }

    #[tokio::test]
    async fn delete_before_load_does_nothing() {
        let transport = ScriptedTransport::default();
        let mut page = ProductDetailPage::new(&transport.catalog(), ImagePaths::default(), "p1");
        page.request_delete();
        assert_eq!(page.confirm_delete().await, None);
        assert!(transport.sent().is_empty());
    }
}
