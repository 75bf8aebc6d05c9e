use catalog_core::{Catalog, CategoryInput, CategoryService, Transport};
use tracing::warn;

use crate::route::Route;
use crate::scope::ViewScope;
use crate::state::{submit_failure, FormPhase};
use crate::validate::validate_category_name;

const CREATE_FAILED: &str = "Failed to create category. Please try again.";

/// New-category form; a single name field.
#[derive(Debug)]
pub struct CategoryCreatePage<T> {
    categories: CategoryService<T>,
    scope: ViewScope,
    name: String,
    phase: FormPhase,
}

impl<T: Transport> CategoryCreatePage<T> {
    pub fn new(catalog: &Catalog<T>) -> Self {
        Self {
            categories: catalog.categories(),
            scope: ViewScope::new(),
            name: String::new(),
            phase: FormPhase::Idle,
        }
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn phase(&self) -> &FormPhase {
        &self.phase
    }

    /// Validates, then creates. Returns the category list route on success.
    pub async fn submit(&mut self) -> Option<Route> {
        if self.phase.is_submitting() {
            return None;
        }
        if let Err(err) = validate_category_name(&self.name) {
            self.phase = FormPhase::Invalid(err.to_string());
            return None;
        }
        self.phase = FormPhase::Submitting;
        let input = CategoryInput {
            name: self.name.clone(),
        };
        let result = self.scope.run(self.categories.create(&input)).await?;
        match result {
            Ok(_) => {
                self.phase = FormPhase::Idle;
                Some(Route::Categories)
            }
            Err(err) => {
                warn!(page = "category_create", error = %err, "failed to create category");
                self.phase = FormPhase::Failed(submit_failure(&err, CREATE_FAILED));
                None
            }
        }
    }

    pub fn cancel(&self) -> Route {
        Route::Categories
    }

    pub fn unmount(&self) {
        self.scope.teardown();
    }
}
