//! Wishlist state.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use evershop_core::{Email, EmailError, ProductId};
use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::ids;
use crate::sim;
use crate::storage::{self, StateStore, keys};

/// A saved product with its save timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    /// Entry id, distinct from the product id.
    pub id: String,
    pub product: Product,
    pub added_at: DateTime<Utc>,
}

/// The wishlist.
///
/// Holds at most one entry per product; saving an already saved product
/// is a no-op. Every mutation persists the full list. The panel flag is
/// session state only.
pub struct WishlistStore {
    items: Vec<WishlistItem>,
    is_open: bool,
    storage: Arc<dyn StateStore>,
    latency: Duration,
}

impl WishlistStore {
    /// Loads the persisted wishlist, starting empty when nothing usable
    /// is stored.
    #[must_use]
    pub fn load(storage: Arc<dyn StateStore>, latency: Duration) -> Self {
        let items = storage::load_collection(storage.as_ref(), keys::WISHLIST);
        Self {
            items,
            is_open: false,
            storage,
            latency,
        }
    }

    /// Saves a product. Already saved products are left untouched.
    pub fn add(&mut self, product: Product) {
        if self.contains(&product.id) {
            return;
        }
        tracing::debug!(product = %product.id, "saving to wishlist");
        self.items.push(WishlistItem {
            id: ids::entity_id(),
            product,
            added_at: Utc::now(),
        });
        self.persist();
    }

    /// Removes the entry for a product.
    pub fn remove(&mut self, product_id: &ProductId) {
        self.items.retain(|item| &item.product.id != product_id);
        self.persist();
    }

    /// Whether the product is saved.
    #[must_use]
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.items.iter().any(|item| &item.product.id == product_id)
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.items.clear();
        self.persist();
    }

    /// Flips the panel open state.
    pub fn toggle(&mut self) {
        self.is_open = !self.is_open;
    }

    /// Whether the panel is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Entries in save order.
    #[must_use]
    pub fn items(&self) -> &[WishlistItem] {
        &self.items
    }

    /// Number of saved products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing is saved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Shares the wishlist to an email address.
    ///
    /// The send is simulated: the address is validated, the usual round
    /// trip elapses, and the share is logged.
    ///
    /// # Errors
    ///
    /// Returns [`EmailError`] when the address does not parse.
    pub async fn share(&self, email: &str) -> Result<(), EmailError> {
        let recipient: Email = email.parse()?;
        sim::simulate_latency(self.latency).await;
        tracing::info!(recipient = %recipient, items = self.items.len(), "wishlist shared");
        Ok(())
    }

    fn persist(&self) {
        if let Err(error) =
            storage::persist_value(self.storage.as_ref(), keys::WISHLIST, &self.items)
        {
            tracing::error!(%error, "failed to persist wishlist");
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::catalog::Category;
    use crate::storage::MemoryStore;

    fn product(id: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            description: String::new(),
            price: dec!(59.00),
            original_price: None,
            category: Category::Women,
            brand: "Evershop".to_owned(),
            images: vec![],
            sizes: vec![],
            colors: vec![],
            in_stock: true,
            rating: 4.0,
            review_count: 0,
            featured: false,
        }
    }

    fn empty_wishlist() -> WishlistStore {
        WishlistStore::load(Arc::new(MemoryStore::new()), Duration::ZERO)
    }

    #[test]
    fn saving_twice_keeps_one_entry() {
        let mut wishlist = empty_wishlist();
        wishlist.add(product("p1"));
        let first_id = wishlist.items().first().unwrap().id.clone();

        wishlist.add(product("p1"));
        assert_eq!(wishlist.len(), 1);
        // The original entry, not a replacement.
        assert_eq!(wishlist.items().first().unwrap().id, first_id);
    }

    #[test]
    fn entries_get_nine_char_ids() {
        let mut wishlist = empty_wishlist();
        wishlist.add(product("p1"));
        assert_eq!(wishlist.items().first().unwrap().id.len(), 9);
    }

    #[test]
    fn remove_clears_contains() {
        let mut wishlist = empty_wishlist();
        wishlist.add(product("p1"));
        wishlist.add(product("p2"));
        assert!(wishlist.contains(&ProductId::new("p1")));

        wishlist.remove(&ProductId::new("p1"));
        assert!(!wishlist.contains(&ProductId::new("p1")));
        assert_eq!(wishlist.len(), 1);
    }

    #[test]
    fn clear_removes_everything() {
        let mut wishlist = empty_wishlist();
        wishlist.add(product("p1"));
        wishlist.clear();
        assert!(wishlist.is_empty());
    }

    #[test]
    fn wishlist_survives_a_reload() {
        let storage: Arc<dyn StateStore> = Arc::new(MemoryStore::new());
        let mut wishlist = WishlistStore::load(Arc::clone(&storage), Duration::ZERO);
        wishlist.add(product("p1"));

        let reloaded = WishlistStore::load(storage, Duration::ZERO);
        assert_eq!(reloaded.len(), 1);
        assert!(reloaded.contains(&ProductId::new("p1")));
    }

    #[tokio::test]
    async fn share_accepts_a_valid_address() {
        let wishlist = empty_wishlist();
        assert!(wishlist.share("friend@example.com").await.is_ok());
    }

    #[tokio::test]
    async fn share_rejects_an_invalid_address() {
        let wishlist = empty_wishlist();
        assert!(wishlist.share("not-an-email").await.is_err());
    }
}
