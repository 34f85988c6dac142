//! Integration tests for EverShop.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p evershop-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_checkout` - Full purchase journeys through one session
//! - `storefront_persistence` - Durable state across session restarts
//! - `storefront_account` - Sign-in, profile, and address book flows
//!
//! The engine simulates its own backend, so these tests need no external
//! services: sessions either run fully in memory or against a throwaway
//! data directory under the system temp dir.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::time::Duration;

use rust_decimal::Decimal;
use secrecy::SecretString;
use uuid::Uuid;

use evershop_core::ProductId;
use evershop_storefront::catalog::{Category, ColorOption, Product, SizeOption};
use evershop_storefront::config::StorefrontConfig;
use evershop_storefront::models::{Address, CardDetails, PaymentMethod};

/// Configuration pointing at a fresh directory under the system temp
/// dir, with no simulated latency and no injected failures.
#[must_use]
pub fn temp_config() -> StorefrontConfig {
    StorefrontConfig {
        data_dir: std::env::temp_dir().join(format!("evershop-test-{}", Uuid::new_v4())),
        latency: Duration::ZERO,
        failure_injection: false,
    }
}

/// Removes a test data directory along with everything in it.
pub fn cleanup(config: &StorefrontConfig) {
    let _ = std::fs::remove_dir_all(&config.data_dir);
}

/// A purchasable product with sizes and colors filled in.
#[must_use]
pub fn sample_product(id: &str, price: Decimal) -> Product {
    Product {
        id: ProductId::new(id),
        name: format!("Sample {id}"),
        description: "A versatile staple for everyday wear.".to_owned(),
        price,
        original_price: None,
        category: Category::Men,
        brand: "Evershop".to_owned(),
        images: vec![format!("/images/{id}.jpg")],
        sizes: vec![
            SizeOption {
                size: "M".to_owned(),
                in_stock: true,
                quantity: 10,
            },
            SizeOption {
                size: "L".to_owned(),
                in_stock: true,
                quantity: 4,
            },
        ],
        colors: vec![ColorOption {
            name: "White".to_owned(),
            hex: "#ffffff".to_owned(),
            images: vec![],
        }],
        in_stock: true,
        rating: 4.5,
        review_count: 12,
        featured: false,
    }
}

/// A shipping address that passes every checkout and account gate.
#[must_use]
pub fn filled_address() -> Address {
    Address {
        first_name: "Jane".to_owned(),
        last_name: "Doe".to_owned(),
        address1: "1 Main St".to_owned(),
        city: "Springfield".to_owned(),
        state: "IL".to_owned(),
        zip_code: "62701".to_owned(),
        ..Address::default()
    }
}

/// A complete card payment.
#[must_use]
pub fn card_payment() -> PaymentMethod {
    PaymentMethod::Card(CardDetails {
        number: "4111111111111111".to_owned(),
        expiry_month: "12".to_owned(),
        expiry_year: "2030".to_owned(),
        cvv: SecretString::from("123".to_owned()),
        name_on_card: "Jane Doe".to_owned(),
    })
}
