//! Confirm-then-delete flow shared by cards, the category list and the
//! product detail page.
//!
//! # Design
//! `DeleteWorkflow` is a small state machine: `Closed` → `Confirming` →
//! `Deleting` → `Closed`. Only a confirmed prompt issues the request, and
//! while it is in flight every other transition is ignored, so a second
//! confirm cannot fire a duplicate delete.

use std::future::Future;

use catalog_core::{ApiError, Category, Product};
use tracing::warn;

use crate::scope::ViewScope;
use crate::state::load_failure;

/// A record that can be deleted through a [`DeleteWorkflow`].
pub trait Entity: Clone {
    /// Shown when the delete request fails.
    const DELETE_FAILED: &'static str;

    fn id(&self) -> &str;

    /// Confirmation prompt text.
    fn delete_warning(&self) -> String;
}

impl Entity for Product {
    const DELETE_FAILED: &'static str = "Failed to delete product. Please try again later.";

    fn id(&self) -> &str {
        &self.id
    }

    fn delete_warning(&self) -> String {
        format!(
            "Are you sure you want to delete \"{}\"? This action cannot be undone.",
            self.name
        )
    }
}

impl Entity for Category {
    const DELETE_FAILED: &'static str = "Failed to delete category. Please try again later.";

    fn id(&self) -> &str {
        &self.id
    }

    fn delete_warning(&self) -> String {
        format!(
            "Are you sure you want to delete the category \"{}\"? This action cannot be undone and may affect products associated with this category.",
            self.name
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Stage<E> {
    Closed,
    Confirming(E),
    Deleting(E),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome<E> {
    /// Nothing was confirmed, or a delete is already in flight.
    Idle,
    Deleted(E),
    Failed(String),
    /// The view went away before the server answered.
    Discarded,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteWorkflow<E> {
    stage: Stage<E>,
    error: Option<String>,
}

impl<E> Default for DeleteWorkflow<E> {
    fn default() -> Self {
        Self {
            stage: Stage::Closed,
            error: None,
        }
    }
}

impl<E: Entity> DeleteWorkflow<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the prompt for `entity`. Ignored while a delete is in flight.
    pub fn request(&mut self, entity: E) {
        if self.is_busy() {
            return;
        }
        self.error = None;
        self.stage = Stage::Confirming(entity);
    }

    /// Closes the prompt without deleting. Ignored while busy.
    pub fn cancel(&mut self) {
        if let Stage::Confirming(_) = self.stage {
            self.stage = Stage::Closed;
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.stage, Stage::Closed)
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.stage, Stage::Deleting(_))
    }

    pub fn target(&self) -> Option<&E> {
        match &self.stage {
            Stage::Closed => None,
            Stage::Confirming(entity) | Stage::Deleting(entity) => Some(entity),
        }
    }

    pub fn prompt(&self) -> Option<String> {
        self.target().map(Entity::delete_warning)
    }

    pub fn confirm_label(&self) -> &'static str {
        if self.is_busy() {
            "Deleting..."
        } else {
            "Delete"
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Moves a confirmed prompt to in-flight and hands back the target.
    pub fn begin(&mut self) -> Option<E> {
        match std::mem::replace(&mut self.stage, Stage::Closed) {
            Stage::Confirming(entity) => {
                self.stage = Stage::Deleting(entity.clone());
                Some(entity)
            }
            other => {
                self.stage = other;
                None
            }
        }
    }

    /// Closes the prompt and reports how the in-flight delete ended.
    pub fn finish<T>(&mut self, result: Result<T, ApiError>) -> DeleteOutcome<E> {
        let entity = match std::mem::replace(&mut self.stage, Stage::Closed) {
            Stage::Deleting(entity) => entity,
            other => {
                self.stage = other;
                return DeleteOutcome::Idle;
            }
        };
        match result {
            Ok(_) => DeleteOutcome::Deleted(entity),
            Err(err) => {
                warn!(id = entity.id(), error = %err, "delete failed");
                let message = load_failure(&err, E::DELETE_FAILED);
                self.error = Some(message.clone());
                DeleteOutcome::Failed(message)
            }
        }
    }

    /// Runs the whole confirmed delete inside `scope`. `delete` receives the
    /// target's id.
    pub async fn confirm<F, Fut, T>(&mut self, scope: &ViewScope, delete: F) -> DeleteOutcome<E>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let Some(entity) = self.begin() else {
            return DeleteOutcome::Idle;
        };
        match scope.run(delete(entity.id().to_string())).await {
            Some(result) => self.finish(result),
            None => {
                self.stage = Stage::Closed;
                DeleteOutcome::Discarded
            }
        }
    }
}
