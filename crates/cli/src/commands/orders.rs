//! Order history commands.
//!
//! # Usage
//!
//! ```bash
//! # List every persisted order
//! es-cli orders list
//!
//! # Show one order in full
//! es-cli orders show 1700000000000-A4H137
//!
//! # Advance an order (what the fulfillment side would do)
//! es-cli orders set-status 1700000000000-A4H137 shipped
//! ```
//!
//! # Environment Variables
//!
//! - `EVERSHOP_DATA_DIR` - Directory holding the persisted session state

use evershop_core::{OrderId, OrderStatus};
use thiserror::Error;
use tracing::info;

use evershop_storefront::config::{ConfigError, StorefrontConfig};
use evershop_storefront::error::StorefrontError;
use evershop_storefront::format::{format_date, format_price};
use evershop_storefront::models::{Address, PaymentSummary};
use evershop_storefront::orders::Order;
use evershop_storefront::session::StorefrontSession;

/// Errors that can occur during order commands.
#[derive(Debug, Error)]
pub enum OrdersError {
    /// No persisted order carries the requested id.
    #[error("No order found with id: {0}")]
    NotFound(String),

    /// The requested status is not a known lifecycle value.
    #[error(
        "Invalid status: {0}. Valid statuses: pending, confirmed, processing, shipped, delivered, cancelled"
    )]
    InvalidStatus(String),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Engine error.
    #[error(transparent)]
    Engine(#[from] StorefrontError),
}

/// List every persisted order, newest last.
///
/// # Errors
///
/// Returns an error if the session state cannot be opened.
pub fn list() -> Result<(), OrdersError> {
    let session = open_session()?;
    let orders = session.orders.orders();

    if orders.is_empty() {
        info!("No orders recorded");
        return Ok(());
    }

    info!("{} orders:", orders.len());
    for order in orders {
        info!(
            "  {}  {:<10}  {:>10}  {}",
            order.id,
            order.status.to_string(),
            format_price(order.breakdown.total),
            format_date(&order.created_at)
        );
    }
    Ok(())
}

/// Show one order in full.
///
/// # Errors
///
/// Returns an error if the session state cannot be opened or no order
/// carries the requested id.
pub fn show(id: &str) -> Result<(), OrdersError> {
    let session = open_session()?;
    let order = session
        .orders
        .order(&OrderId::new(id))
        .ok_or_else(|| OrdersError::NotFound(id.to_owned()))?;

    print_order(order);
    Ok(())
}

/// Replace an order's status.
///
/// # Errors
///
/// Returns an error if the status is unknown, the session state cannot
/// be opened, or no order carries the requested id.
pub fn set_status(id: &str, status: &str) -> Result<(), OrdersError> {
    let status: OrderStatus = status
        .parse()
        .map_err(|_| OrdersError::InvalidStatus(status.to_owned()))?;

    let mut session = open_session()?;
    let order_id = OrderId::new(id);
    if !session.orders.update_order_status(&order_id, status) {
        return Err(OrdersError::NotFound(id.to_owned()));
    }

    info!("Order {order_id} is now {status}");
    Ok(())
}

fn open_session() -> Result<StorefrontSession, OrdersError> {
    let config = StorefrontConfig::from_env()?;
    Ok(StorefrontSession::open(&config)?)
}

fn print_order(order: &Order) {
    info!("Order {}", order.id);
    info!("  Status: {}", order.status);
    info!("  Placed: {}", format_date(&order.created_at));
    info!("  Customer: {}", order.user_id);

    info!("  Items:");
    for item in &order.items {
        info!(
            "    {} x {} ({} / {}) - {}",
            item.quantity,
            item.product.name,
            item.size,
            item.color,
            format_price(item.line_total())
        );
    }

    info!("  Ship to: {}", format_address(&order.shipping_address));
    info!("  Bill to: {}", format_address(&order.billing_address));
    match &order.payment {
        PaymentSummary::Card { card_number, .. } => info!("  Paid with card {card_number}"),
        PaymentSummary::Cash => info!("  Paid with cash on delivery"),
    }

    info!("  Subtotal: {}", format_price(order.breakdown.subtotal));
    info!("  Shipping: {}", format_price(order.breakdown.shipping));
    info!("  Tax:      {}", format_price(order.breakdown.tax));
    if !order.breakdown.discount.is_zero() {
        info!("  Discount: -{}", format_price(order.breakdown.discount));
    }
    info!("  Total:    {}", format_price(order.breakdown.total));

    if let Some(tracking) = &order.tracking_number {
        info!("  Tracking: {tracking}");
    }
    if let Some(eta) = &order.estimated_delivery {
        info!("  Estimated delivery: {}", format_date(eta));
    }
}

fn format_address(address: &Address) -> String {
    format!(
        "{} {}, {}, {}, {} {}",
        address.first_name,
        address.last_name,
        address.address1,
        address.city,
        address.state,
        address.zip_code
    )
}
