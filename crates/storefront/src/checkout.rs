//! Checkout state machine.
//!
//! A checkout walks shipping, payment, review and confirmation in order.
//! Forward transitions are gated on per-stage validity; the review stage
//! is only left by placing the order. Totals are derived on demand so
//! they always track the current cart, address and discount code.

use std::fmt;

use evershop_core::UserId;
use thiserror::Error;

use crate::cart::{CartItem, CartStore};
use crate::models::{Address, PaymentMethod};
use crate::orders::{Order, OrderDraft, OrderError, OrderStore};
use crate::pricing::{self, PricingBreakdown};

/// Length of a well-formed discount code entry.
const DISCOUNT_CODE_LEN: usize = 6;

/// Errors from checkout progression.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Required shipping fields are missing.
    #[error("please fill in all required shipping fields")]
    IncompleteShipping,

    /// The selected payment method is missing required fields.
    #[error("please fill in all required payment fields")]
    IncompletePayment,

    /// The entered discount code fails the lexical gate.
    #[error("invalid discount code, please enter a 6-digit code")]
    InvalidDiscountCode,

    /// Review is only left by placing the order.
    #[error("place the order to finish checkout")]
    PlacementRequired,

    /// The checkout already reached confirmation.
    #[error("checkout is already complete")]
    Complete,

    /// Placement failed downstream.
    #[error(transparent)]
    Placement(#[from] OrderError),
}

/// Stages of a checkout, in order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CheckoutStage {
    #[default]
    Shipping,
    Payment,
    Review,
    Confirmation,
}

impl CheckoutStage {
    /// The following stage, `None` at confirmation.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Shipping => Some(Self::Payment),
            Self::Payment => Some(Self::Review),
            Self::Review => Some(Self::Confirmation),
            Self::Confirmation => None,
        }
    }

    /// The stage a shopper can step back to.
    ///
    /// Shipping has nothing before it and confirmation is terminal, so
    /// both answer `None`.
    #[must_use]
    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::Shipping | Self::Confirmation => None,
            Self::Payment => Some(Self::Shipping),
            Self::Review => Some(Self::Payment),
        }
    }
}

impl fmt::Display for CheckoutStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Shipping => "shipping",
            Self::Payment => "payment",
            Self::Review => "review",
            Self::Confirmation => "confirmation",
        };
        f.write_str(label)
    }
}

/// One checkout in progress.
#[derive(Debug)]
pub struct Checkout {
    stage: CheckoutStage,
    shipping_address: Address,
    billing_address: Address,
    billing_same_as_shipping: bool,
    payment: PaymentMethod,
    discount_code: Option<String>,
}

impl Default for Checkout {
    fn default() -> Self {
        Self::new()
    }
}

impl Checkout {
    /// Starts a checkout at the shipping stage with empty forms, billing
    /// to the shipping address and an empty card selected.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stage: CheckoutStage::default(),
            shipping_address: Address::default(),
            billing_address: Address::default(),
            billing_same_as_shipping: true,
            payment: PaymentMethod::default(),
            discount_code: None,
        }
    }

    /// Current stage.
    #[must_use]
    pub fn stage(&self) -> CheckoutStage {
        self.stage
    }

    /// Shipping form state.
    #[must_use]
    pub fn shipping_address(&self) -> &Address {
        &self.shipping_address
    }

    /// Replaces the shipping form state.
    pub fn set_shipping_address(&mut self, address: Address) {
        self.shipping_address = address;
    }

    /// Billing form state; only used when billing differs from shipping.
    #[must_use]
    pub fn billing_address(&self) -> &Address {
        &self.billing_address
    }

    /// Replaces the billing form state.
    pub fn set_billing_address(&mut self, address: Address) {
        self.billing_address = address;
    }

    /// Whether billing reuses the shipping address.
    #[must_use]
    pub fn billing_same_as_shipping(&self) -> bool {
        self.billing_same_as_shipping
    }

    /// Sets whether billing reuses the shipping address.
    pub fn set_billing_same_as_shipping(&mut self, same: bool) {
        self.billing_same_as_shipping = same;
    }

    /// Selected payment method.
    #[must_use]
    pub fn payment(&self) -> &PaymentMethod {
        &self.payment
    }

    /// Replaces the selected payment method.
    pub fn set_payment(&mut self, payment: PaymentMethod) {
        self.payment = payment;
    }

    /// The applied discount code, if any.
    #[must_use]
    pub fn discount_code(&self) -> Option<&str> {
        self.discount_code.as_deref()
    }

    /// Moves to the next stage if the current one validates.
    ///
    /// On failure the stage is retained and the validation error comes
    /// back.
    ///
    /// # Errors
    ///
    /// [`CheckoutError::IncompleteShipping`] or
    /// [`CheckoutError::IncompletePayment`] when a gate fails,
    /// [`CheckoutError::PlacementRequired`] at review,
    /// [`CheckoutError::Complete`] at confirmation.
    pub fn advance(&mut self) -> Result<CheckoutStage, CheckoutError> {
        match self.stage {
            CheckoutStage::Shipping => {
                if !self.shipping_address.has_required_fields() {
                    return Err(CheckoutError::IncompleteShipping);
                }
                self.stage = CheckoutStage::Payment;
            }
            CheckoutStage::Payment => {
                if !self.payment.is_valid() {
                    return Err(CheckoutError::IncompletePayment);
                }
                self.stage = CheckoutStage::Review;
            }
            CheckoutStage::Review => return Err(CheckoutError::PlacementRequired),
            CheckoutStage::Confirmation => return Err(CheckoutError::Complete),
        }
        Ok(self.stage)
    }

    /// Steps back one stage where allowed; shipping and confirmation
    /// stay put. Backward moves are never validated.
    pub fn back(&mut self) -> CheckoutStage {
        if let Some(previous) = self.stage.previous() {
            self.stage = previous;
        }
        self.stage
    }

    /// Applies a discount code.
    ///
    /// The entry must trim to exactly six ASCII digits; anything else is
    /// rejected before it reaches the pricing table. Passing the gate
    /// only stores the code. Whether it actually discounts is the
    /// table's decision.
    ///
    /// # Errors
    ///
    /// [`CheckoutError::InvalidDiscountCode`] when the entry fails the
    /// lexical gate.
    pub fn apply_discount(&mut self, code: &str) -> Result<(), CheckoutError> {
        let trimmed = code.trim();
        if trimmed.len() != DISCOUNT_CODE_LEN || !trimmed.chars().all(|c| c.is_ascii_digit()) {
            return Err(CheckoutError::InvalidDiscountCode);
        }
        self.discount_code = Some(trimmed.to_owned());
        Ok(())
    }

    /// Clears the applied discount code.
    pub fn remove_discount(&mut self) {
        self.discount_code = None;
    }

    /// Cost breakdown for the given cart items under the current address
    /// and discount code.
    #[must_use]
    pub fn totals(&self, items: &[CartItem]) -> PricingBreakdown {
        pricing::calculate_totals(
            items,
            Some(&self.shipping_address),
            self.discount_code.as_deref(),
        )
    }

    /// Places the order.
    ///
    /// Shipping and payment are re-validated here even if their gates
    /// passed earlier, since forms stay editable across stages. The
    /// draft carries the breakdown the shopper was shown. Success clears
    /// the cart and enters confirmation; failure keeps the stage so the
    /// shopper can retry.
    ///
    /// # Errors
    ///
    /// The gate errors from [`Self::advance`], [`CheckoutError::Complete`]
    /// after confirmation, or [`CheckoutError::Placement`] when the order
    /// store rejects the placement.
    pub async fn place_order(
        &mut self,
        cart: &mut CartStore,
        orders: &mut OrderStore,
        user_id: Option<UserId>,
    ) -> Result<Order, CheckoutError> {
        if self.stage == CheckoutStage::Confirmation {
            return Err(CheckoutError::Complete);
        }
        if !self.shipping_address.has_required_fields() {
            return Err(CheckoutError::IncompleteShipping);
        }
        if !self.payment.is_valid() {
            return Err(CheckoutError::IncompletePayment);
        }

        let billing_address = if self.billing_same_as_shipping {
            None
        } else {
            Some(self.billing_address.clone())
        };
        let draft = OrderDraft {
            items: cart.items().to_vec(),
            shipping_address: self.shipping_address.clone(),
            billing_address,
            payment: self.payment.clone(),
            user_id,
            breakdown: self.totals(cart.items()),
        };

        let order = orders.create_order(draft).await?;
        cart.clear();
        self.stage = CheckoutStage::Confirmation;
        Ok(order)
    }
}

// =============================================================================
// Tests
// =============================================================================
