use catalog_core::{Catalog, Category, CategoryInput, CategoryService, Transport};
use tracing::warn;

use crate::delete::{DeleteOutcome, DeleteWorkflow};
use crate::present::{CategoryRow, NO_CATEGORIES};
use crate::scope::ViewScope;
use crate::state::{load_failure, ListView, PageState};
use crate::validate::validate_category_name;

const LOAD_FAILED: &str = "Failed to fetch categories. Please try again later.";
const RENAME_FAILED: &str = "Failed to update category. Please try again later.";

/// Inline rename of one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameDialog {
    pub category_id: String,
    pub name: String,
    pub saving: bool,
    pub error: Option<String>,
}

/// All categories, with delete and inline rename.
#[derive(Debug)]
pub struct CategoryListPage<T> {
    categories: CategoryService<T>,
    scope: ViewScope,
    state: PageState<Vec<Category>>,
    delete: DeleteWorkflow<Category>,
    rename: Option<RenameDialog>,
}

impl<T: Transport> CategoryListPage<T> {
    pub fn new(catalog: &Catalog<T>) -> Self {
        Self {
            categories: catalog.categories(),
            scope: ViewScope::new(),
            state: PageState::Loading,
            delete: DeleteWorkflow::new(),
            rename: None,
        }
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    pub fn state(&self) -> &PageState<Vec<Category>> {
        &self.state
    }

    pub async fn load(&mut self) {
        self.state = PageState::Loading;
        let Some(result) = self.scope.run(self.categories.list()).await else {
            return;
        };
        if let Err(err) = &result {
            warn!(page = "category_list", error = %err, "failed to load categories");
        }
        self.state = PageState::settle(result, LOAD_FAILED);
    }

    pub fn view(&self) -> ListView<CategoryRow> {
        match &self.state {
            PageState::Loading => ListView::Loading,
            PageState::Failed(msg) => ListView::Failed(msg.clone()),
            PageState::NotFound => ListView::Empty(NO_CATEGORIES),
            PageState::Ready(list) if list.is_empty() => ListView::Empty(NO_CATEGORIES),
            PageState::Ready(list) => ListView::Items(list.iter().map(CategoryRow::from).collect()),
        }
    }

    fn find(&self, id: &str) -> Option<&Category> {
        self.state.ready()?.iter().find(|c| c.id == id)
    }

    // --- delete ---

    pub fn delete_workflow(&self) -> &DeleteWorkflow<Category> {
        &self.delete
    }

    pub fn request_delete(&mut self, id: &str) {
        if let Some(category) = self.find(id).cloned() {
            self.delete.request(category);
        }
    }

    pub fn cancel_delete(&mut self) {
        self.delete.cancel();
    }

    /// Deletes the confirmed category and drops it from the list.
    pub async fn confirm_delete(&mut self) -> DeleteOutcome<Category> {
        let categories = &self.categories;
        let outcome = self
            .delete
            .confirm(&self.scope, |id| async move { categories.delete(&id).await })
            .await;
        if let (DeleteOutcome::Deleted(deleted), Some(list)) = (&outcome, self.state.ready_mut()) {
            list.retain(|c| c.id != deleted.id);
        }
        outcome
    }

    // --- rename ---

    pub fn rename_dialog(&self) -> Option<&RenameDialog> {
        self.rename.as_ref()
    }

    /// Opens the dialog pre-filled with the current name.
    pub fn open_rename(&mut self, id: &str) {
        if self.rename.as_ref().is_some_and(|d| d.saving) {
            return;
        }
        let Some(category) = self.find(id).cloned() else {
            return;
        };
        self.rename = Some(RenameDialog {
            category_id: category.id,
            name: category.name,
            saving: false,
            error: None,
        });
    }

    pub fn set_rename_name(&mut self, name: impl Into<String>) {
        if let Some(dialog) = self.rename.as_mut() {
            dialog.name = name.into();
        }
    }

    pub fn cancel_rename(&mut self) {
        if self.rename.as_ref().is_some_and(|d| !d.saving) {
            self.rename = None;
        }
    }

    /// Saves the new name and swaps in the server's record. The dialog stays
    /// open with an error when validation or the request fails.
    pub async fn save_rename(&mut self) -> bool {
        let Some(dialog) = self.rename.as_mut() else {
            return false;
        };
        if dialog.saving {
            return false;
        }
        if let Err(err) = validate_category_name(&dialog.name) {
            dialog.error = Some(err.to_string());
            return false;
        }
        dialog.saving = true;
        dialog.error = None;
        let id = dialog.category_id.clone();
        let input = CategoryInput {
            name: dialog.name.clone(),
        };

        let Some(result) = self.scope.run(self.categories.update(&id, &input)).await else {
            return false;
        };
        match result {
            Ok(updated) => {
                if let Some(slot) = self
                    .state
                    .ready_mut()
                    .and_then(|list| list.iter_mut().find(|c| c.id == updated.id))
                {
                    *slot = updated;
                }
                self.rename = None;
                true
            }
            Err(err) => {
                warn!(page = "category_list", id = %id, error = %err, "failed to rename category");
                if let Some(dialog) = self.rename.as_mut() {
                    dialog.saving = false;
                    dialog.error = Some(load_failure(&err, RENAME_FAILED));
                }
                false
            }
        }
    }

    pub fn unmount(&self) {
        self.scope.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{category_json, ScriptedTransport};

    async fn loaded(transport: &ScriptedTransport) -> CategoryListPage<ScriptedTransport> {
        let mut page = CategoryListPage::new(&transport.catalog());
        page.load().await;
        page
    }

    fn two_categories(transport: &ScriptedTransport) {
        transport.reply(
            200,
            &format!("[{},{}]", category_json("c1", "Tools"), category_json("c2", "Garden")),
        );
    }

    #[tokio::test]
    async fn empty_list_is_informational() {
        let transport = ScriptedTransport::default();
        transport.reply(200, "[]");
        let page = loaded(&transport).await;
        assert_eq!(page.view(), ListView::Empty(NO_CATEGORIES));
    }

    #[tokio::test]
    async fn rows_show_created_date() {
        let transport = ScriptedTransport::default();
        two_categories(&transport);
        let page = loaded(&transport).await;
        let ListView::Items(rows) = page.view() else {
            panic!("expected rows");
        };
        assert_eq!(rows[0].created.as_deref(), Some("3/1/2024"));
    }

    #[tokio::test]
    async fn delete_requires_confirmation() {
        let transport = ScriptedTransport::default();
        two_categories(&transport);
        let mut page = loaded(&transport).await;

        page.request_delete("c1");
        assert!(page
            .delete_workflow()
            .prompt()
            .unwrap()
            .contains("may affect products associated with this category"));
        page.cancel_delete();
        assert_eq!(page.confirm_delete().await, DeleteOutcome::Idle);
        assert_eq!(page.state().ready().unwrap().len(), 2);
        assert_eq!(transport.sent().len(), 1);
    }

    #[tokio::test]
    async fn confirmed_delete_removes_only_that_category() {
        let transport = ScriptedTransport::default();
        two_categories(&transport);
        transport.reply(200, r#"{"message":"Category deleted"}"#);
        let mut page = loaded(&transport).await;

        page.request_delete("c1");
        assert!(matches!(page.confirm_delete().await, DeleteOutcome::Deleted(_)));
        let ids: Vec<&str> = page.state().ready().unwrap().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c2"]);
        assert!(!page.delete_workflow().is_open());
    }

    #[tokio::test]
    async fn failed_delete_keeps_category() {
        let transport = ScriptedTransport::default();
        two_categories(&transport);
        transport.reply(500, "");
        let mut page = loaded(&transport).await;

        page.request_delete("c2");
        page.confirm_delete().await;
        assert_eq!(page.state().ready().unwrap().len(), 2);
        assert_eq!(
            page.delete_workflow().error(),
            Some("Failed to delete category. Please try again later.")
        );
    }

    #[tokio::test]
    async fn rename_replaces_record_with_server_response() {
        let transport = ScriptedTransport::default();
        two_categories(&transport);
        transport.reply(200, &category_json("c1", "Hand tools"));
        let mut page = loaded(&transport).await;

        page.open_rename("c1");
        assert_eq!(page.rename_dialog().unwrap().name, "Tools");
        page.set_rename_name("Hand tools");
        assert!(page.save_rename().await);
        assert!(page.rename_dialog().is_none());
        assert_eq!(page.state().ready().unwrap()[0].name, "Hand tools");
    }

    #[tokio::test]
    async fn blank_rename_stays_local() {
        let transport = ScriptedTransport::default();
        two_categories(&transport);
        let mut page = loaded(&transport).await;

        page.open_rename("c2");
        page.set_rename_name("  ");
        assert!(!page.save_rename().await);
        assert_eq!(
            page.rename_dialog().unwrap().error.as_deref(),
            Some("Category name is required")
        );
        assert_eq!(transport.sent().len(), 1);
    }

    #[tokio::test]
    async fn failed_rename_keeps_dialog_open() {
        let transport = ScriptedTransport::default();
        two_categories(&transport);
        transport.reply(500, "");
        let mut page = loaded(&transport).await;

        page.open_rename("c1");
        page.set_rename_name("Hand tools");
        assert!(!page.save_rename().await);
        let dialog = page.rename_dialog().unwrap();
        assert!(!dialog.saving);
        assert_eq!(dialog.error.as_deref(), Some(RENAME_FAILED));
        assert_eq!(page.state().ready().unwrap()[0].name, "Tools");
    }
}
