//! Order history and placement.
//!
//! Orders are built once, at checkout completion, from an [`OrderDraft`]
//! and are immutable afterwards except for their status, which an
//! external order-management collaborator advances through
//! [`OrderStore::update_order_status`].

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use evershop_core::{OrderId, OrderStatus, UserId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::CartItem;
use crate::ids;
use crate::models::{Address, PaymentMethod, PaymentSummary};
use crate::pricing::PricingBreakdown;
use crate::sim::{self, FailureInjector};
use crate::storage::{self, StateStore, keys};

/// Days between placement and the promised delivery date.
const DELIVERY_ESTIMATE_DAYS: i64 = 7;

/// Placement runs at this multiple of the base latency.
const PLACEMENT_LATENCY_FACTOR: u32 = 2;

/// Errors from order placement.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Another placement is still running.
    #[error("an order placement is already in progress")]
    PlacementInFlight,

    /// The simulated payment backend rejected the order.
    #[error("failed to place order, please try again")]
    PlacementFailed,
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    /// Line items in cart order.
    pub items: Vec<CartItem>,
    pub shipping_address: Address,
    pub billing_address: Address,
    /// Masked payment record.
    #[serde(rename = "paymentMethod")]
    pub payment: PaymentSummary,
    /// Cost breakdown as shown at checkout, serialized flat.
    #[serde(flatten)]
    pub breakdown: PricingBreakdown,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_delivery: Option<DateTime<Utc>>,
}

/// Everything the builder needs to record an order.
///
/// The breakdown arrives precomputed from the checkout, so the stored
/// totals always match what the shopper was shown, discount included.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub items: Vec<CartItem>,
    pub shipping_address: Address,
    /// `None` bills to the shipping address.
    pub billing_address: Option<Address>,
    pub payment: PaymentMethod,
    /// `None` places as the guest user.
    pub user_id: Option<UserId>,
    pub breakdown: PricingBreakdown,
}

fn build_order(draft: OrderDraft, placed_at: DateTime<Utc>) -> Order {
    let billing_address = draft
        .billing_address
        .unwrap_or_else(|| draft.shipping_address.clone());
    Order {
        id: ids::order_id(placed_at),
        user_id: draft.user_id.unwrap_or_else(UserId::guest),
        items: draft.items,
        shipping_address: draft.shipping_address,
        billing_address,
        payment: draft.payment.to_summary(),
        breakdown: draft.breakdown,
        status: OrderStatus::Confirmed,
        created_at: placed_at,
        updated_at: placed_at,
        tracking_number: Some(ids::tracking_number(placed_at)),
        estimated_delivery: Some(placed_at + chrono::Duration::days(DELIVERY_ESTIMATE_DAYS)),
    }
}

/// Append-only order history with a current-order pointer.
pub struct OrderStore {
    orders: Vec<Order>,
    current: Option<OrderId>,
    loading: bool,
    storage: Arc<dyn StateStore>,
    latency: Duration,
    injector: Box<dyn FailureInjector>,
}

impl OrderStore {
    /// Loads the persisted history, starting empty when nothing usable
    /// is stored.
    #[must_use]
    pub fn load(
        storage: Arc<dyn StateStore>,
        latency: Duration,
        injector: Box<dyn FailureInjector>,
    ) -> Self {
        let orders = storage::load_collection(storage.as_ref(), keys::ORDERS);
        Self {
            orders,
            current: None,
            loading: false,
            storage,
            latency,
            injector,
        }
    }

    /// Places an order from a draft.
    ///
    /// The simulated backend round trip runs at twice the base latency
    /// and fails at the injected rate. On success the order is appended
    /// to the history, persisted, and becomes the current order. The
    /// loading flag clears on every exit path.
    ///
    /// # Errors
    ///
    /// [`OrderError::PlacementInFlight`] when a placement is already
    /// running, [`OrderError::PlacementFailed`] when the simulated
    /// backend rejects the order.
    pub async fn create_order(&mut self, draft: OrderDraft) -> Result<Order, OrderError> {
        if self.loading {
            return Err(OrderError::PlacementInFlight);
        }
        self.loading = true;
        let result = self.place(draft).await;
        self.loading = false;
        result
    }

    async fn place(&mut self, draft: OrderDraft) -> Result<Order, OrderError> {
        sim::simulate_latency(self.latency * PLACEMENT_LATENCY_FACTOR).await;
        if self.injector.roll(sim::ORDER_FAILURE_RATE) {
            tracing::warn!("simulated backend rejected the order");
            return Err(OrderError::PlacementFailed);
        }

        let order = build_order(draft, Utc::now());
        tracing::info!(order_id = %order.id, total = %order.breakdown.total, "order placed");
        self.orders.push(order.clone());
        self.current = Some(order.id.clone());
        self.persist();
        Ok(order)
    }

    /// Whether a placement is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Full history in placement order.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Looks an order up by id.
    #[must_use]
    pub fn order(&self, id: &OrderId) -> Option<&Order> {
        self.orders.iter().find(|order| &order.id == id)
    }

    /// Orders placed by one user.
    #[must_use]
    pub fn orders_for_user(&self, user_id: &UserId) -> Vec<&Order> {
        self.orders
            .iter()
            .filter(|order| &order.user_id == user_id)
            .collect()
    }

    /// The order highlighted on the confirmation screen, if any.
    #[must_use]
    pub fn current_order(&self) -> Option<&Order> {
        self.current.as_ref().and_then(|id| self.order(id))
    }

    /// Points the confirmation screen at an order, or clears it.
    pub fn set_current(&mut self, id: Option<OrderId>) {
        self.current = id;
    }

    /// Advances an order's status and bumps its update time.
    ///
    /// Returns `false` when the order id is unknown.
    pub fn update_order_status(&mut self, id: &OrderId, status: OrderStatus) -> bool {
        let Some(order) = self.orders.iter_mut().find(|order| &order.id == id) else {
            return false;
        };
        order.status = status;
        order.updated_at = Utc::now();
        tracing::info!(order_id = %id, status = %status, "order status updated");
        self.persist();
        true
    }

    fn persist(&self) {
        if self.orders.is_empty() {
            return;
        }
        if let Err(error) =
            storage::persist_value(self.storage.as_ref(), keys::ORDERS, &self.orders)
        {
            tracing::error!(%error, "failed to persist orders");
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
