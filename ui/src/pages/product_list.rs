use catalog_core::{Catalog, Category, CategoryService, Product, ProductService, Transport};
use tracing::warn;

use crate::card::CardList;
use crate::delete::DeleteOutcome;
use crate::filter::ProductFilter;
use crate::present::{CardView, ImagePaths, NO_MATCHING_PRODUCTS, NO_PRODUCTS};
use crate::scope::ViewScope;
use crate::state::{ListView, PageState};

const LOAD_FAILED: &str = "Failed to fetch data. Please try again later.";

#[derive(Debug, Clone, PartialEq)]
pub struct ProductListData {
    pub cards: CardList,
    /// Options for the category filter.
    pub categories: Vec<Category>,
}

/// All products, filterable by search term and category.
#[derive(Debug)]
pub struct ProductListPage<T> {
    products: ProductService<T>,
    categories: CategoryService<T>,
    scope: ViewScope,
    paths: ImagePaths,
    filter: ProductFilter,
    state: PageState<ProductListData>,
}

impl<T: Transport> ProductListPage<T> {
    pub fn new(catalog: &Catalog<T>, paths: ImagePaths) -> Self {
        Self {
            products: catalog.products(),
            categories: catalog.categories(),
            scope: ViewScope::new(),
            paths,
            filter: ProductFilter::default(),
            state: PageState::Loading,
        }
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    pub fn state(&self) -> &PageState<ProductListData> {
        &self.state
    }

    pub fn filter(&self) -> &ProductFilter {
        &self.filter
    }

    /// Products and categories are fetched together; either failing fails the page.
    pub async fn load(&mut self) {
        self.state = PageState::Loading;
        let both = async { tokio::try_join!(self.products.list(), self.categories.list()) };
        let Some(result) = self.scope.run(both).await else {
            return;
        };
        if let Err(err) = &result {
            warn!(page = "product_list", error = %err, "failed to load products");
        }
        let data = result.map(|(products, categories)| ProductListData {
            cards: CardList::new(products),
            categories,
        });
        self.state = PageState::settle(data, LOAD_FAILED);
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.filter.set_search(term);
    }

    /// Empty clears the category filter.
    pub fn set_category_filter(&mut self, id: impl Into<String>) {
        self.filter.set_category(id);
    }

    pub fn visible_products(&self) -> Vec<&Product> {
        match self.state.ready() {
            Some(data) => self
                .filter
                .apply(data.cards.cards().iter().map(|card| card.product())),
            None => Vec::new(),
        }
    }

    pub fn view(&self) -> ListView<CardView> {
        let data = match &self.state {
            PageState::Loading => return ListView::Loading,
            PageState::Failed(msg) => return ListView::Failed(msg.clone()),
            PageState::NotFound => return ListView::Empty(NO_PRODUCTS),
            PageState::Ready(data) => data,
        };
        let cards = data.cards.views(&self.paths, |p| self.filter.matches(p));
        if !cards.is_empty() {
            return ListView::Items(cards);
        }
        if self.filter.is_active() {
            ListView::Empty(NO_MATCHING_PRODUCTS)
        } else {
            ListView::Empty(NO_PRODUCTS)
        }
    }

    pub fn request_delete(&mut self, id: &str) {
        if let Some(data) = self.state.ready_mut() {
            data.cards.request_delete(id);
        }
    }

    pub fn cancel_delete(&mut self, id: &str) {
        if let Some(data) = self.state.ready_mut() {
            data.cards.cancel_delete(id);
        }
    }

    pub async fn confirm_delete(&mut self, id: &str) -> DeleteOutcome<Product> {
        match self.state.ready_mut() {
            Some(data) => data.cards.confirm_delete(id, &self.products, &self.scope).await,
            None => DeleteOutcome::Idle,
        }
    }

    pub fn unmount(&self) {
        self.scope.teardown();
    }
}
