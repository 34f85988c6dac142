//! Session state persistence.
//!
//! Each state container persists its whole collection as one JSON value
//! under a fixed string key, the way a browser storefront would use local
//! storage. Backends implement [`StateStore`]: the file-backed store is
//! the durable path, the in-memory store backs ephemeral sessions and
//! tests.

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Keys for persisted session state.
///
/// The cart predates the prefixed naming scheme and keeps its bare key
/// so existing persisted carts still load.
pub mod keys {
    /// Cart items.
    pub const CART: &str = "cart";
    /// Wishlist entries.
    pub const WISHLIST: &str = "evershop-wishlist";
    /// Comparison shortlist.
    pub const COMPARISON: &str = "evershop-comparison";
    /// Order history.
    pub const ORDERS: &str = "evershop-orders";
    /// Product reviews.
    pub const REVIEWS: &str = "evershop-reviews";
    /// Signed-in user.
    pub const USER: &str = "evershop-user";

    /// Every key the engine persists under, for whole-session wipes.
    pub const ALL: [&str; 6] = [CART, WISHLIST, COMPARISON, ORDERS, REVIEWS, USER];
}

/// Errors from the persistence layer.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Backing file could not be read or written.
    #[error("storage io failure: {0}")]
    Io(#[from] std::io::Error),

    /// State could not be encoded as JSON.
    #[error("state encoding failure: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A keyed blob store for session state.
pub trait StateStore: Send + Sync {
    /// Raw JSON stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores raw JSON under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backend cannot accept the write.
    fn put(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str);
}

/// Loads and decodes the value stored under `key`.
///
/// Returns `None` when nothing is stored or when the stored JSON no
/// longer decodes; an unreadable value is removed so it cannot shadow
/// later writes.
pub fn load_value<T: DeserializeOwned>(store: &dyn StateStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(error) => {
            tracing::warn!(key, %error, "discarding unreadable persisted state");
            store.remove(key);
            None
        }
    }
}

/// Loads a persisted collection, falling back to empty when absent or
/// unreadable.
pub fn load_collection<T: DeserializeOwned>(store: &dyn StateStore, key: &str) -> Vec<T> {
    load_value(store, key).unwrap_or_default()
}

/// Encodes `value` and stores it under `key`.
///
/// # Errors
///
/// Returns [`StorageError`] when encoding fails or the backend rejects
/// the write.
pub fn persist_value<T: Serialize>(
    store: &dyn StateStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value)?;
    store.put(key, &raw)
}

// =============================================================================
// Tests
// =============================================================================
