//! Session wiring.
//!
//! A [`StorefrontSession`] owns one instance of every state store, all
//! backed by the same persistence layer. Opening a session mirrors a
//! page load: each store hydrates whatever earlier sessions left
//! behind, then persists as it changes.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use uuid::Uuid;

use crate::account::AccountStore;
use crate::cart::CartStore;
use crate::checkout::Checkout;
use crate::comparison::ComparisonStore;
use crate::config::StorefrontConfig;
use crate::error::Result;
use crate::orders::OrderStore;
use crate::reviews::ReviewStore;
use crate::sim::{FailureInjector, NoFailures};
use crate::storage::{JsonFileStore, MemoryStore, StateStore};
use crate::wishlist::WishlistStore;

/// One shopper's session over a shared persistence layer.
///
/// The stores are public fields so callers can borrow them
/// independently; checkout relies on that when it drains the cart
/// while recording the order.
pub struct StorefrontSession {
    id: Uuid,
    /// Shopping cart.
    pub cart: CartStore,
    /// Saved-for-later list.
    pub wishlist: WishlistStore,
    /// Side-by-side comparison tray.
    pub comparison: ComparisonStore,
    /// Order history and placement.
    pub orders: OrderStore,
    /// Product reviews.
    pub reviews: ReviewStore,
    /// Sign-in state and address book.
    pub account: AccountStore,
    /// Checkout in progress.
    pub checkout: Checkout,
}

impl StorefrontSession {
    /// Opens a session over the configured data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created.
    pub fn open(config: &StorefrontConfig) -> Result<Self> {
        let storage: Arc<dyn StateStore> = Arc::new(JsonFileStore::open(&config.data_dir)?);
        let session = Self::assemble(
            storage,
            config.latency,
            config.build_injector(),
            config.build_injector(),
        );
        info!(
            session = %session.id,
            dir = %config.data_dir.display(),
            "storefront session opened"
        );
        Ok(session)
    }

    /// Opens a throwaway session: in-memory storage, no latency, no
    /// injected failures.
    #[must_use]
    pub fn ephemeral() -> Self {
        Self::assemble(
            Arc::new(MemoryStore::new()),
            Duration::ZERO,
            Box::new(NoFailures),
            Box::new(NoFailures),
        )
    }

    fn assemble(
        storage: Arc<dyn StateStore>,
        latency: Duration,
        order_failures: Box<dyn FailureInjector>,
        account_failures: Box<dyn FailureInjector>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            cart: CartStore::load(Arc::clone(&storage)),
            wishlist: WishlistStore::load(Arc::clone(&storage), latency),
            comparison: ComparisonStore::load(Arc::clone(&storage)),
            orders: OrderStore::load(Arc::clone(&storage), latency, order_failures),
            reviews: ReviewStore::load(Arc::clone(&storage)),
            account: AccountStore::load(storage, latency, account_failures),
            checkout: Checkout::new(),
        }
    }

    /// Session identifier, for log correlation.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }
}

// =============================================================================
// Tests
// =============================================================================
