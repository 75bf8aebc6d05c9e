//! Page controllers for the catalog client.
//!
//! # Overview
//! Each page in [`pages`] owns its state as a tagged union, calls the
//! resource services from `catalog_core`, and exposes render-ready view
//! models. Rendering and routing belong to the host; page actions that
//! navigate return a [`Route`].
//!
//! # Design
//! - Async work runs inside the page's [`ViewScope`]; results that arrive
//!   after `unmount` are dropped.
//! - Deletes go through one [`DeleteWorkflow`] regardless of the entity.
//! - Nothing is cached between pages; every page fetches on `load`.

pub mod card;
pub mod delete;
pub mod filter;
pub mod pages;
pub mod present;
pub mod route;
pub mod scope;
pub mod state;
pub mod validate;

#[cfg(test)]
mod testing;

pub use card::{CardList, ProductCard};
pub use delete::{DeleteOutcome, DeleteWorkflow, Entity};
pub use filter::ProductFilter;
pub use present::{CardView, CategoryRow, Gallery, ImagePaths, ProductDetailView};
pub use route::Route;
pub use scope::ViewScope;
pub use state::{FormPhase, ListView, PageState};
pub use validate::ValidationError;
