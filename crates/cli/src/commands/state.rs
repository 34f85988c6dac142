//! Persisted session state inspection.
//!
//! # Usage
//!
//! ```bash
//! # Summarize what earlier sessions persisted
//! es-cli state show
//!
//! # Wipe everything (cart, wishlist, orders, user, ...)
//! es-cli state clear
//!
//! # Wipe a single collection
//! es-cli state clear orders
//! ```
//!
//! # Environment Variables
//!
//! - `EVERSHOP_DATA_DIR` - Directory holding the persisted session state

use tracing::info;

use evershop_storefront::comparison::MAX_COMPARISON_ITEMS;
use evershop_storefront::config::StorefrontConfig;
use evershop_storefront::session::StorefrontSession;
use evershop_storefront::storage::{JsonFileStore, StateStore, keys};

/// Summarize the persisted session state.
///
/// # Errors
///
/// Returns an error if the session state cannot be opened.
pub fn show() -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    let session = StorefrontSession::open(&config)?;

    info!("Session state in {}", config.data_dir.display());
    info!(
        "  Cart: {} lines, {} units",
        session.cart.items().len(),
        session.cart.item_count()
    );
    info!("  Wishlist: {} entries", session.wishlist.len());
    info!(
        "  Comparison: {} of {} slots",
        session.comparison.len(),
        MAX_COMPARISON_ITEMS
    );
    info!("  Orders: {}", session.orders.orders().len());
    info!("  Reviews: {}", session.reviews.reviews().len());
    match session.account.current_user() {
        Some(user) => info!("  Signed in as {} <{}>", user.full_name(), user.email),
        None => info!("  Signed in: no"),
    }
    Ok(())
}

/// Remove persisted session state, one collection or all of it.
///
/// # Errors
///
/// Returns an error if the data directory cannot be opened or the
/// collection name is not recognized.
pub fn clear(collection: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    let store = JsonFileStore::open(&config.data_dir)?;

    match collection {
        Some(name) => {
            let key = key_for(name).ok_or_else(|| {
                format!(
                    "Invalid collection: {name}. Valid collections: \
                     cart, wishlist, comparison, orders, reviews, user"
                )
            })?;
            store.remove(key);
            info!("Cleared {name} from {}", config.data_dir.display());
        }
        None => {
            for key in keys::ALL {
                store.remove(key);
            }
            info!("Session state cleared from {}", config.data_dir.display());
        }
    }
    Ok(())
}

fn key_for(name: &str) -> Option<&'static str> {
    match name {
        "cart" => Some(keys::CART),
        "wishlist" => Some(keys::WISHLIST),
        "comparison" => Some(keys::COMPARISON),
        "orders" => Some(keys::ORDERS),
        "reviews" => Some(keys::REVIEWS),
        "user" => Some(keys::USER),
        _ => None,
    }
}
