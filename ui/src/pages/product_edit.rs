use catalog_core::{
    Catalog, Category, CategoryService, ImageUpload, Product, ProductInput, ProductService, Transport,
};
use tracing::warn;

use crate::present::{ImagePaths, PRODUCT_NOT_FOUND};
use crate::route::Route;
use crate::scope::ViewScope;
use crate::state::{submit_failure, FormPhase, PageState};
use crate::validate::validate_product;

const LOAD_FAILED: &str = "Failed to fetch product data. Please try again later.";
const UPDATE_FAILED: &str = "Failed to update product. Please try again.";

/// Everything the edit form needs once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct EditData {
    pub categories: Vec<Category>,
    pub draft: ProductInput,
    /// Stored filenames that will be kept on save.
    pub existing_images: Vec<String>,
}

impl EditData {
    fn new(product: Product, categories: Vec<Category>) -> Self {
        let draft = ProductInput {
            category: product.category_id().unwrap_or_default().to_string(),
            name: product.name,
            title: product.title,
            description: product.description,
            images: Vec::new(),
        };
        Self {
            categories,
            draft,
            existing_images: product.images,
        }
    }
}

/// Edit form for one product, pre-filled from the server.
#[derive(Debug)]
pub struct ProductEditPage<T> {
    id: String,
    products: ProductService<T>,
    categories: CategoryService<T>,
    scope: ViewScope,
    paths: ImagePaths,
    state: PageState<EditData>,
    phase: FormPhase,
}

impl<T: Transport> ProductEditPage<T> {
    pub fn new(catalog: &Catalog<T>, paths: ImagePaths, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            products: catalog.products(),
            categories: catalog.categories(),
            scope: ViewScope::new(),
            paths,
            state: PageState::Loading,
            phase: FormPhase::Idle,
        }
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    pub fn state(&self) -> &PageState<EditData> {
        &self.state
    }

    /// Text shown in place of the form when the product is missing or
    /// failed to load.
    pub fn notice(&self) -> Option<&str> {
        match &self.state {
            PageState::NotFound => Some(PRODUCT_NOT_FOUND),
            other => other.error(),
        }
    }

    pub fn phase(&self) -> &FormPhase {
        &self.phase
    }

    /// `None` until the product has loaded.
    pub fn draft_mut(&mut self) -> Option<&mut ProductInput> {
        self.state.ready_mut().map(|data| &mut data.draft)
    }

    /// Replaces the set of new images picked for upload.
    pub fn set_images(&mut self, images: Vec<ImageUpload>) {
        if let Some(draft) = self.draft_mut() {
            draft.images = images;
        }
    }

    /// URLs of the stored images still attached to the draft.
    pub fn existing_image_urls(&self) -> Vec<String> {
        self.state
            .ready()
            .map(|data| data.existing_images.iter().map(|name| self.paths.url(name)).collect())
            .unwrap_or_default()
    }

    /// Drops a stored image from the draft; the server learns on submit.
    pub fn remove_existing_image(&mut self, index: usize) -> Option<String> {
        let images = &mut self.state.ready_mut()?.existing_images;
        (index < images.len()).then(|| images.remove(index))
    }

    /// The product and the category list are fetched together.
    pub async fn load(&mut self) {
        self.state = PageState::Loading;
        let both = async { tokio::try_join!(self.products.get(&self.id), self.categories.list()) };
        let Some(result) = self.scope.run(both).await else {
            return;
        };
        if let Err(err) = &result {
            warn!(page = "product_edit", id = %self.id, error = %err, "failed to load product");
        }
        let data = result.map(|(product, categories)| product.map(|p| EditData::new(p, categories)));
        self.state = PageState::settle_record(data, LOAD_FAILED);
    }

    /// Validates, then saves. Returns the product's detail route on success.
    pub async fn submit(&mut self) -> Option<Route> {
        if self.phase.is_submitting() {
            return None;
        }
        let data = self.state.ready()?;
        if let Err(err) = validate_product(&data.draft) {
            self.phase = FormPhase::Invalid(err.to_string());
            return None;
        }
        self.phase = FormPhase::Submitting;
        let update = self
            .products
            .update(&self.id, &data.draft, &data.existing_images);
        let result = self.scope.run(update).await?;
        match result {
            Ok(_) => {
                self.phase = FormPhase::Idle;
                Some(Route::ProductDetail(self.id.clone()))
            }
            Err(err) => {
                warn!(page = "product_edit", id = %self.id, error = %err, "failed to update product");
                self.phase = FormPhase::Failed(submit_failure(&err, UPDATE_FAILED));
                None
            }
        }
    }

    pub fn cancel(&self) -> Route {
        Route::ProductDetail(self.id.clone())
    }

    pub fn unmount(&self) {
        self.scope.teardown();
    }
}
