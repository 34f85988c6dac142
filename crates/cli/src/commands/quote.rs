//! Price quoting through the checkout calculator.
//!
//! # Usage
//!
//! ```bash
//! # One unit at $100, no discount
//! es-cli quote --price 100.00
//!
//! # Two units with a discount code
//! es-cli quote --price 100.00 --quantity 2 --discount SAVE10
//! ```

use evershop_core::ProductId;
use rust_decimal::Decimal;
use tracing::info;

use evershop_storefront::cart::CartItem;
use evershop_storefront::catalog::{Category, Product};
use evershop_storefront::format::format_price;
use evershop_storefront::pricing::calculate_totals;

/// Price a hypothetical cart line and print the breakdown.
pub fn run(price: Decimal, quantity: u32, discount: Option<&str>) {
    let items = vec![quoted_line(price, quantity)];
    let breakdown = calculate_totals(&items, None, discount);

    info!("Quote for {quantity} x {}", format_price(price));
    info!("  Subtotal: {}", format_price(breakdown.subtotal));
    info!("  Shipping: {}", format_price(breakdown.shipping));
    info!("  Tax:      {}", format_price(breakdown.tax));
    if !breakdown.discount.is_zero() {
        info!("  Discount: -{}", format_price(breakdown.discount));
    }
    info!("  Total:    {}", format_price(breakdown.total));
}

/// A synthetic cart line; the calculator only reads price and quantity.
fn quoted_line(price: Decimal, quantity: u32) -> CartItem {
    CartItem {
        product: Product {
            id: ProductId::new("quoted"),
            name: "Quoted item".to_owned(),
            description: String::new(),
            price,
            original_price: None,
            category: Category::Men,
            brand: String::new(),
            images: vec![],
            sizes: vec![],
            colors: vec![],
            in_stock: true,
            rating: 0.0,
            review_count: 0,
            featured: false,
        },
        size: String::new(),
        color: String::new(),
        quantity,
    }
}
