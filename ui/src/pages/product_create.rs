use catalog_core::{Catalog, Category, CategoryService, ImageUpload, ProductInput, ProductService, Transport};
use tracing::warn;

use crate::route::Route;
use crate::scope::ViewScope;
use crate::state::{submit_failure, FormPhase, PageState};
use crate::validate::validate_product;

const CATEGORIES_FAILED: &str = "Failed to fetch categories. Please try again later.";
const CREATE_FAILED: &str = "Failed to create product. Please try again.";

/// New-product form. The category options load on mount.
#[derive(Debug)]
pub struct ProductCreatePage<T> {
    products: ProductService<T>,
    categories: CategoryService<T>,
    scope: ViewScope,
    options: PageState<Vec<Category>>,
    draft: ProductInput,
    phase: FormPhase,
}

impl<T: Transport> ProductCreatePage<T> {
    pub fn new(catalog: &Catalog<T>) -> Self {
        Self {
            products: catalog.products(),
            categories: catalog.categories(),
            scope: ViewScope::new(),
            options: PageState::Loading,
            draft: ProductInput::default(),
            phase: FormPhase::Idle,
        }
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    pub fn categories(&self) -> &PageState<Vec<Category>> {
        &self.options
    }

    pub fn draft(&self) -> &ProductInput {
        &self.draft
    }

    /// Field edits go straight to the draft; nothing is sent until submit.
    pub fn draft_mut(&mut self) -> &mut ProductInput {
        &mut self.draft
    }

    /// Replaces the set of images picked for upload.
    pub fn set_images(&mut self, images: Vec<ImageUpload>) {
        self.draft.images = images;
    }

    pub fn phase(&self) -> &FormPhase {
        &self.phase
    }

    pub async fn load(&mut self) {
        self.options = PageState::Loading;
        let Some(result) = self.scope.run(self.categories.list()).await else {
            return;
        };
        if let Err(err) = &result {
            warn!(page = "product_create", error = %err, "failed to load categories");
        }
        self.options = PageState::settle(result, CATEGORIES_FAILED);
    }

    /// Validates, then creates. Returns the product list route on success.
    pub async fn submit(&mut self) -> Option<Route> {
        if self.phase.is_submitting() {
            return None;
        }
        if let Err(err) = validate_product(&self.draft) {
            self.phase = FormPhase::Invalid(err.to_string());
            return None;
        }
        self.phase = FormPhase::Submitting;
        let result = self.scope.run(self.products.create(&self.draft)).await?;
        match result {
            Ok(_) => {
                self.phase = FormPhase::Idle;
                Some(Route::Products)
            }
            Err(err) => {
                warn!(page = "product_create", error = %err, "failed to create product");
                self.phase = FormPhase::Failed(submit_failure(&err, CREATE_FAILED));
                None
            }
        }
    }

    pub fn cancel(&self) -> Route {
        Route::Products
    }

    pub fn unmount(&self) {
        self.scope.teardown();
    }
}
