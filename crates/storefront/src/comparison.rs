//! Product comparison shortlist.

use std::sync::Arc;

use evershop_core::ProductId;

use crate::catalog::Product;
use crate::storage::{self, StateStore, keys};

/// Most products a comparison can hold at once.
pub const MAX_COMPARISON_ITEMS: usize = 4;

/// A bounded shortlist of products to compare side by side.
///
/// Adding past the cap or adding a duplicate reports failure through the
/// return value rather than an error; the storefront surfaces it as a
/// disabled control. Persisted lists longer than the cap are truncated
/// on load.
pub struct ComparisonStore {
    products: Vec<Product>,
    storage: Arc<dyn StateStore>,
}

impl ComparisonStore {
    /// Loads the persisted shortlist, truncated to the cap.
    #[must_use]
    pub fn load(storage: Arc<dyn StateStore>) -> Self {
        let mut products: Vec<Product> =
            storage::load_collection(storage.as_ref(), keys::COMPARISON);
        products.truncate(MAX_COMPARISON_ITEMS);
        Self { products, storage }
    }

    /// Adds a product to the shortlist.
    ///
    /// Returns `false` without changing anything when the shortlist is
    /// full or already holds the product.
    pub fn add(&mut self, product: Product) -> bool {
        if self.products.len() >= MAX_COMPARISON_ITEMS || self.contains(&product.id) {
            tracing::debug!(product = %product.id, "comparison add rejected");
            return false;
        }
        self.products.push(product);
        self.persist();
        true
    }

    /// Removes a product from the shortlist.
    pub fn remove(&mut self, product_id: &ProductId) {
        self.products.retain(|product| &product.id != product_id);
        self.persist();
    }

    /// Empties the shortlist.
    pub fn clear(&mut self) {
        self.products.clear();
        self.persist();
    }

    /// Whether the product is on the shortlist.
    #[must_use]
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.products.iter().any(|product| &product.id == product_id)
    }

    /// Whether another product still fits.
    #[must_use]
    pub fn can_add_more(&self) -> bool {
        self.products.len() < MAX_COMPARISON_ITEMS
    }

    /// Shortlisted products in insertion order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of shortlisted products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the shortlist is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    fn persist(&self) {
        if let Err(error) =
            storage::persist_value(self.storage.as_ref(), keys::COMPARISON, &self.products)
        {
            tracing::error!(%error, "failed to persist comparison");
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
