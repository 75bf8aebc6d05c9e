use catalog_core::{Catalog, Product, ProductService, Transport};
use tracing::warn;

use crate::card::CardList;
use crate::delete::DeleteOutcome;
use crate::present::{CardView, ImagePaths, NO_PRODUCTS};
use crate::scope::ViewScope;
use crate::state::{ListView, PageState};

/// Number of products featured on the landing page.
pub const FEATURED_COUNT: usize = 3;

const LOAD_FAILED: &str = "Failed to fetch products. Please try again later.";

/// Landing page: the newest products as cards.
#[derive(Debug)]
pub struct HomePage<T> {
    products: ProductService<T>,
    scope: ViewScope,
    paths: ImagePaths,
    state: PageState<CardList>,
}

impl<T: Transport> HomePage<T> {
    pub fn new(catalog: &Catalog<T>, paths: ImagePaths) -> Self {
        Self {
            products: catalog.products(),
            scope: ViewScope::new(),
            paths,
            state: PageState::Loading,
        }
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    pub fn state(&self) -> &PageState<CardList> {
        &self.state
    }

    pub async fn load(&mut self) {
        self.state = PageState::Loading;
        let Some(result) = self.scope.run(self.products.list()).await else {
            return;
        };
        if let Err(err) = &result {
            warn!(page = "home", error = %err, "failed to load products");
        }
        let featured = result.map(|mut products| {
            products.truncate(FEATURED_COUNT);
            CardList::new(products)
        });
        self.state = PageState::settle(featured, LOAD_FAILED);
    }

    pub fn view(&self) -> ListView<CardView> {
        match &self.state {
            PageState::Loading => ListView::Loading,
            PageState::Failed(msg) => ListView::Failed(msg.clone()),
            PageState::NotFound => ListView::Empty(NO_PRODUCTS),
            PageState::Ready(cards) if cards.is_empty() => ListView::Empty(NO_PRODUCTS),
            PageState::Ready(cards) => ListView::Items(cards.views(&self.paths, |_| true)),
        }
    }

    pub fn request_delete(&mut self, id: &str) {
        if let Some(cards) = self.state.ready_mut() {
            cards.request_delete(id);
        }
    }

    pub fn cancel_delete(&mut self, id: &str) {
        if let Some(cards) = self.state.ready_mut() {
            cards.cancel_delete(id);
        }
    }

    pub async fn confirm_delete(&mut self, id: &str) -> DeleteOutcome<Product> {
        match self.state.ready_mut() {
            Some(cards) => cards.confirm_delete(id, &self.products, &self.scope).await,
            None => DeleteOutcome::Idle,
        }
    }

    pub fn unmount(&self) {
        self.scope.teardown();
    }
}
