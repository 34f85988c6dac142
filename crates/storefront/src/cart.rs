//! Shopping cart state.

use std::sync::Arc;

use evershop_core::ProductId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::storage::{self, StateStore, keys};

/// One cart line: a product in a chosen size and color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product: Product,
    pub size: String,
    pub color: String,
    pub quantity: u32,
}

impl CartItem {
    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }

    fn matches(&self, product_id: &ProductId, size: &str, color: &str) -> bool {
        &self.product.id == product_id && self.size == size && self.color == color
    }
}

/// The shopping cart.
///
/// Lines are keyed by the (product id, size, color) triple; adding the
/// same triple again merges by summing quantities. Every mutation to the
/// lines persists the full list. The open/closed drawer flag is session
/// state and is not persisted.
pub struct CartStore {
    items: Vec<CartItem>,
    is_open: bool,
    storage: Arc<dyn StateStore>,
}

impl CartStore {
    /// Loads the persisted cart, starting empty when nothing usable is
    /// stored.
    #[must_use]
    pub fn load(storage: Arc<dyn StateStore>) -> Self {
        let items = storage::load_collection(storage.as_ref(), keys::CART);
        Self {
            items,
            is_open: false,
            storage,
        }
    }

    /// Adds a product in the given size and color.
    ///
    /// Merges into an existing line when the triple already sits in the
    /// cart. A zero quantity is ignored; lines always carry at least one
    /// unit.
    pub fn add(
        &mut self,
        product: Product,
        size: impl Into<String>,
        color: impl Into<String>,
        quantity: u32,
    ) {
        if quantity == 0 {
            return;
        }
        let size = size.into();
        let color = color.into();
        tracing::debug!(product = %product.id, %size, %color, quantity, "adding to cart");
        if let Some(line) = self
            .items
            .iter_mut()
            .find(|line| line.matches(&product.id, &size, &color))
        {
            line.quantity += quantity;
        } else {
            self.items.push(CartItem {
                product,
                size,
                color,
                quantity,
            });
        }
        self.persist();
    }

    /// Sets the quantity of a line; zero removes it. Unknown triples are
    /// ignored.
    pub fn update_quantity(
        &mut self,
        product_id: &ProductId,
        size: &str,
        color: &str,
        quantity: u32,
    ) {
        if quantity == 0 {
            self.remove(product_id, size, color);
            return;
        }
        if let Some(line) = self
            .items
            .iter_mut()
            .find(|line| line.matches(product_id, size, color))
        {
            line.quantity = quantity;
            self.persist();
        }
    }

    /// Removes the line with the given triple.
    pub fn remove(&mut self, product_id: &ProductId, size: &str, color: &str) {
        self.items
            .retain(|line| !line.matches(product_id, size, color));
        self.persist();
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.items.clear();
        self.persist();
    }

    /// Flips the drawer open state.
    pub fn toggle(&mut self) {
        self.is_open = !self.is_open;
    }

    /// Sets the drawer open state.
    pub fn set_open(&mut self, open: bool) {
        self.is_open = open;
    }

    /// Whether the drawer is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Cart lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of line totals, unrounded.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Total units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|line| line.quantity).sum()
    }

    fn persist(&self) {
        if let Err(error) = storage::persist_value(self.storage.as_ref(), keys::CART, &self.items) {
            tracing::error!(%error, "failed to persist cart");
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
