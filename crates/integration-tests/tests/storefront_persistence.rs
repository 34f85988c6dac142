//! Integration tests for durable session state.
//!
//! Every store persists through the same file-backed layer, one JSON
//! document per key. These tests open real sessions over throwaway
//! data directories and check what survives a restart.

use rust_decimal_macros::dec;

use evershop_core::{ProductId, UserId};
use evershop_integration_tests::{
    card_payment, cleanup, filled_address, sample_product, temp_config,
};
use evershop_storefront::reviews::NewReview;
use evershop_storefront::session::StorefrontSession;
use evershop_storefront::storage::{JsonFileStore, StateStore, keys};

// =============================================================================
// Restart Round Trips
// =============================================================================

#[test]
fn test_cart_survives_session_restart() {
    let config = temp_config();

    {
        let mut session = StorefrontSession::open(&config).expect("open session");
        session
            .cart
            .add(sample_product("tee", dec!(25.50)), "M", "White", 2);
        session
            .cart
            .add(sample_product("jacket", dec!(100.00)), "L", "Black", 1);
    }

    let session = StorefrontSession::open(&config).expect("reopen session");
    assert_eq!(session.cart.items().len(), 2);
    assert_eq!(session.cart.item_count(), 3);
    assert_eq!(session.cart.subtotal(), dec!(151.00));

    cleanup(&config);
}

#[test]
fn test_wishlist_and_comparison_survive_restart() {
    let config = temp_config();

    {
        let mut session = StorefrontSession::open(&config).expect("open session");
        session.wishlist.add(sample_product("tee", dec!(25.50)));
        assert!(session.comparison.add(sample_product("tee", dec!(25.50))));
        assert!(session.comparison.add(sample_product("jacket", dec!(100.00))));
    }

    let session = StorefrontSession::open(&config).expect("reopen session");
    assert_eq!(session.wishlist.len(), 1);
    assert!(session.wishlist.contains(&ProductId::new("tee")));
    assert_eq!(session.comparison.len(), 2);

    cleanup(&config);
}

#[test]
fn test_reviews_survive_restart() {
    let config = temp_config();

    {
        let mut session = StorefrontSession::open(&config).expect("open session");
        session.reviews.add_review(NewReview {
            product_id: ProductId::new("tee"),
            user_id: UserId::new("k3j9x2m1q"),
            user_name: "Jane D.".to_owned(),
            user_avatar: None,
            rating: 4,
            title: "Solid".to_owned(),
            content: "Fits well, washes fine.".to_owned(),
            pros: vec!["comfortable".to_owned()],
            cons: vec![],
            verified: true,
        });
    }

    let session = StorefrontSession::open(&config).expect("reopen session");
    let summary = session.reviews.summary(&ProductId::new("tee"));
    assert_eq!(summary.total_reviews, 1);
    assert!((summary.average_rating - 4.0).abs() < f64::EPSILON);

    cleanup(&config);
}

#[tokio::test]
async fn test_order_history_survives_restart_with_current_reset() {
    let config = temp_config();

    let placed_id = {
        let mut session = StorefrontSession::open(&config).expect("open session");
        session
            .cart
            .add(sample_product("tee", dec!(100.00)), "M", "White", 1);
        session.checkout.set_shipping_address(filled_address());
        session.checkout.advance().expect("shipping form is complete");
        session.checkout.set_payment(card_payment());
        session.checkout.advance().expect("payment form is complete");
        session
            .checkout
            .place_order(&mut session.cart, &mut session.orders, None)
            .await
            .expect("placement succeeds")
            .id
    };

    let session = StorefrontSession::open(&config).expect("reopen session");
    assert_eq!(session.orders.orders().len(), 1);
    assert!(session.orders.order(&placed_id).is_some());
    // The confirmation pointer is per session, never persisted.
    assert!(session.orders.current_order().is_none());
    // Placing drained the cart; the restart sees it empty too.
    assert!(session.cart.is_empty());

    cleanup(&config);
}

#[tokio::test]
async fn test_signed_in_user_survives_restart() {
    let config = temp_config();

    let user_id = {
        let mut session = StorefrontSession::open(&config).expect("open session");
        session
            .account
            .login("jane@example.com", "password123")
            .await
            .expect("login succeeds without injected failures")
            .id
    };

    let session = StorefrontSession::open(&config).expect("reopen session");
    let user = session.account.current_user().expect("user persisted");
    assert_eq!(user.id, user_id);

    cleanup(&config);
}

// =============================================================================
// Storage Layout
// =============================================================================

#[tokio::test]
async fn test_state_lands_in_one_file_per_key() {
    let config = temp_config();

    {
        let mut session = StorefrontSession::open(&config).expect("open session");
        session
            .cart
            .add(sample_product("tee", dec!(25.50)), "M", "White", 1);
        session.wishlist.add(sample_product("tee", dec!(25.50)));
        session
            .account
            .login("jane@example.com", "password123")
            .await
            .expect("login succeeds");
    }

    assert!(config.data_dir.join("cart.json").exists());
    assert!(config.data_dir.join("evershop-wishlist.json").exists());
    assert!(config.data_dir.join("evershop-user.json").exists());
    // Nothing was ordered, so no order history document exists.
    assert!(!config.data_dir.join("evershop-orders.json").exists());

    cleanup(&config);
}

#[test]
fn test_persisted_documents_keep_the_legacy_shape() {
    let config = temp_config();

    {
        let mut session = StorefrontSession::open(&config).expect("open session");
        session
            .cart
            .add(sample_product("tee", dec!(25.50)), "M", "White", 2);
    }

    let raw = std::fs::read_to_string(config.data_dir.join("cart.json")).expect("read cart file");
    let doc: serde_json::Value = serde_json::from_str(&raw).expect("cart file holds JSON");

    // Documents written here must stay loadable by the web storefront:
    // camelCase field names, money carried as strings.
    let line = doc.get(0).expect("one cart line");
    assert_eq!(line["quantity"], 2);
    assert_eq!(line["product"]["price"], "25.50");
    assert_eq!(line["product"]["inStock"], true);
    assert!(line["product"].get("in_stock").is_none());

    cleanup(&config);
}

#[test]
fn test_corrupt_state_heals_to_empty() {
    let config = temp_config();
    std::fs::create_dir_all(&config.data_dir).expect("create data dir");
    let cart_path = config.data_dir.join("cart.json");
    std::fs::write(&cart_path, "{definitely not json").expect("write corrupt state");

    let session = StorefrontSession::open(&config).expect("open session");
    assert!(session.cart.is_empty());
    // The unreadable document is dropped so it cannot shadow new writes.
    assert!(!cart_path.exists());

    cleanup(&config);
}

#[test]
fn test_removing_every_key_resets_the_session() {
    let config = temp_config();

    {
        let mut session = StorefrontSession::open(&config).expect("open session");
        session
            .cart
            .add(sample_product("tee", dec!(25.50)), "M", "White", 1);
        session.wishlist.add(sample_product("jacket", dec!(100.00)));
    }

    let store = JsonFileStore::open(&config.data_dir).expect("open store");
    for key in keys::ALL {
        store.remove(key);
    }

    let session = StorefrontSession::open(&config).expect("reopen session");
    assert!(session.cart.is_empty());
    assert!(session.wishlist.is_empty());
    assert!(session.orders.orders().is_empty());

    cleanup(&config);
}
