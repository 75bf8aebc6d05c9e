//! Product cards with their own delete prompt.
//!
//! A card deletes itself and reports success through a callback; the
//! owning [`CardList`] uses that to drop the card.

use catalog_core::{Product, ProductService, Transport};

use crate::delete::{DeleteOutcome, DeleteWorkflow};
use crate::present::{CardView, ImagePaths};
use crate::scope::ViewScope;

#[derive(Debug, Clone, PartialEq)]
pub struct ProductCard {
    product: Product,
    delete: DeleteWorkflow<Product>,
}

impl ProductCard {
    pub fn new(product: Product) -> Self {
        Self {
            product,
            delete: DeleteWorkflow::new(),
        }
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn view(&self, paths: &ImagePaths) -> CardView {
        CardView::new(&self.product, paths)
    }

    pub fn delete_workflow(&self) -> &DeleteWorkflow<Product> {
        &self.delete
    }

    pub fn request_delete(&mut self) {
        self.delete.request(self.product.clone());
    }

    pub fn cancel_delete(&mut self) {
        self.delete.cancel();
    }

    /// Deletes the product if the prompt was confirmed; `on_deleted` runs
    /// only after the server accepted the delete.
    pub async fn confirm_delete<T: Transport>(
        &mut self,
        service: &ProductService<T>,
        scope: &ViewScope,
        on_deleted: impl FnOnce(&Product),
    ) -> DeleteOutcome<Product> {
        let outcome = self
            .delete
            .confirm(scope, |id| async move { service.delete(&id).await })
            .await;
        if let DeleteOutcome::Deleted(product) = &outcome {
            on_deleted(product);
        }
        outcome
    }
}

/// The cards shown by a page, in server order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardList {
    cards: Vec<ProductCard>,
}

impl CardList {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            cards: products.into_iter().map(ProductCard::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[ProductCard] {
        &self.cards
    }

    pub fn get(&self, id: &str) -> Option<&ProductCard> {
        self.cards.iter().find(|card| card.product.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut ProductCard> {
        self.cards.iter_mut().find(|card| card.product.id == id)
    }

    pub fn views(&self, paths: &ImagePaths, keep: impl Fn(&Product) -> bool) -> Vec<CardView> {
        self.cards
            .iter()
            .filter(|card| keep(&card.product))
            .map(|card| card.view(paths))
            .collect()
    }

    pub fn request_delete(&mut self, id: &str) {
        if let Some(card) = self.get_mut(id) {
            card.request_delete();
        }
    }

    pub fn cancel_delete(&mut self, id: &str) {
        if let Some(card) = self.get_mut(id) {
            card.cancel_delete();
        }
    }

    /// Confirms the open prompt on card `id` and drops the card once the
    /// server accepted the delete.
    pub async fn confirm_delete<T: Transport>(
        &mut self,
        id: &str,
        service: &ProductService<T>,
        scope: &ViewScope,
    ) -> DeleteOutcome<Product> {
        let mut removed = None;
        let Some(card) = self.get_mut(id) else {
            return DeleteOutcome::Idle;
        };
        let outcome = card
            .confirm_delete(service, scope, |product| removed = Some(product.id.clone()))
            .await;
        if let Some(removed) = removed {
            self.cards.retain(|card| card.product.id != removed);
        }
        outcome
    }
}
