//! Order pricing.
//!
//! Deterministic money math for the checkout: line item subtotal, flat
//! shipping, sales tax and a closed table of discount codes. Everything
//! here is pure; the checkout derives a fresh breakdown from it on every
//! relevant change.

use evershop_core::round_cents;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::cart::CartItem;
use crate::models::Address;

/// Flat shipping fee applied to every non-empty order.
pub const SHIPPING_FLAT_FEE: Decimal = dec!(5.00);

/// Sales tax rate applied to the subtotal.
pub const TAX_RATE: Decimal = dec!(0.085);

/// Cost composition of an order.
///
/// Every field is rounded to cent precision. The total is computed from
/// the unrounded parts before its own rounding, so it can differ by a
/// cent from the sum of the rounded fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingBreakdown {
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub tax: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
}

impl PricingBreakdown {
    /// The breakdown of an empty cart.
    pub const ZERO: Self = Self {
        subtotal: Decimal::ZERO,
        shipping: Decimal::ZERO,
        tax: Decimal::ZERO,
        discount: Decimal::ZERO,
        total: Decimal::ZERO,
    };
}

/// Recognized discount codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscountCode {
    /// `SAVE10`: 10% off the subtotal.
    Save10,
    /// `SAVE20`: 20% off the subtotal.
    Save20,
    /// `FREESHIP`: waives the shipping fee.
    FreeShip,
}

impl DiscountCode {
    /// Case-insensitive lookup in the code table.
    #[must_use]
    pub fn lookup(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "SAVE10" => Some(Self::Save10),
            "SAVE20" => Some(Self::Save20),
            "FREESHIP" => Some(Self::FreeShip),
            _ => None,
        }
    }

    fn amount(self, subtotal: Decimal, shipping: Decimal) -> Decimal {
        match self {
            Self::Save10 => subtotal * dec!(0.10),
            Self::Save20 => subtotal * dec!(0.20),
            Self::FreeShip => shipping,
        }
    }
}

/// Computes the cost breakdown for a list of line items.
///
/// An empty list prices as all zeros regardless of the other arguments.
/// The shipping address is accepted for interface parity with the
/// checkout but does not affect the flat fee. Codes that miss the table
/// contribute a zero discount; the lexical gate on user-entered codes
/// lives in the checkout, not here.
///
/// Negative arithmetic never escapes: a negative subtotal clamps to zero
/// before the dependent terms, and the total floors at zero.
#[must_use]
pub fn calculate_totals(
    items: &[CartItem],
    _shipping_address: Option<&Address>,
    discount_code: Option<&str>,
) -> PricingBreakdown {
    if items.is_empty() {
        return PricingBreakdown::ZERO;
    }

    let subtotal = items
        .iter()
        .map(CartItem::line_total)
        .sum::<Decimal>()
        .max(Decimal::ZERO);
    let shipping = SHIPPING_FLAT_FEE;
    let tax = subtotal * TAX_RATE;
    let discount = discount_code
        .and_then(DiscountCode::lookup)
        .map_or(Decimal::ZERO, |code| code.amount(subtotal, shipping));
    let total = (subtotal + shipping + tax - discount).max(Decimal::ZERO);

    PricingBreakdown {
        subtotal: round_cents(subtotal),
        shipping: round_cents(shipping),
        tax: round_cents(tax),
        discount: round_cents(discount),
        total: round_cents(total),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use evershop_core::ProductId;

    use super::*;
    use crate::catalog::{Category, Product};

    fn item(price: Decimal, quantity: u32) -> CartItem {
        let product = Product {
            id: ProductId::new("p1"),
            name: "Linen Shirt".to_owned(),
            description: String::new(),
            price,
            original_price: None,
            category: Category::Men,
            brand: "Evershop".to_owned(),
            images: vec![],
            sizes: vec![],
            colors: vec![],
            in_stock: true,
            rating: 4.5,
            review_count: 3,
            featured: false,
        };
        CartItem {
            product,
            size: "M".to_owned(),
            color: "White".to_owned(),
            quantity,
        }
    }

    #[test]
    fn hundred_dollar_item_prices_to_the_reference_breakdown() {
        let breakdown = calculate_totals(&[item(dec!(100.00), 1)], None, None);
        assert_eq!(breakdown.subtotal, dec!(100.00));
        assert_eq!(breakdown.shipping, dec!(5.00));
        assert_eq!(breakdown.tax, dec!(8.50));
        assert_eq!(breakdown.discount, dec!(0.00));
        assert_eq!(breakdown.total, dec!(113.50));
    }

    #[test]
    fn save10_discounts_ten_percent_of_subtotal() {
        let breakdown = calculate_totals(&[item(dec!(100.00), 1)], None, Some("SAVE10"));
        assert_eq!(breakdown.discount, dec!(10.00));
        assert_eq!(breakdown.total, dec!(103.50));
    }

    #[test]
    fn save20_discounts_twenty_percent_of_subtotal() {
        let breakdown = calculate_totals(&[item(dec!(100.00), 1)], None, Some("SAVE20"));
        assert_eq!(breakdown.discount, dec!(20.00));
        assert_eq!(breakdown.total, dec!(93.50));
    }

    #[test]
    fn freeship_discount_equals_the_shipping_fee() {
        let breakdown = calculate_totals(&[item(dec!(100.00), 1)], None, Some("FREESHIP"));
        assert_eq!(breakdown.shipping, dec!(5.00));
        assert_eq!(breakdown.discount, dec!(5.00));
        assert_eq!(breakdown.total, dec!(108.50));
    }

    #[test]
    fn unrecognized_code_contributes_nothing() {
        let breakdown = calculate_totals(&[item(dec!(100.00), 1)], None, Some("BADCODE"));
        assert_eq!(breakdown.discount, dec!(0.00));
        assert_eq!(breakdown.total, dec!(113.50));
    }

    #[test]
    fn code_lookup_is_case_insensitive() {
        let breakdown = calculate_totals(&[item(dec!(100.00), 1)], None, Some("save10"));
        assert_eq!(breakdown.discount, dec!(10.00));
    }

    #[test]
    fn empty_cart_prices_to_all_zeros() {
        let breakdown = calculate_totals(&[], None, Some("SAVE20"));
        assert_eq!(breakdown, PricingBreakdown::ZERO);
    }

    #[test]
    fn quantities_multiply_into_the_subtotal() {
        let breakdown = calculate_totals(&[item(dec!(25.00), 3), item(dec!(10.00), 2)], None, None);
        assert_eq!(breakdown.subtotal, dec!(95.00));
        assert_eq!(breakdown.tax, dec!(8.08));
    }

    #[test]
    fn total_rounds_from_unrounded_parts() {
        // subtotal 19.995 and tax 1.699575 round up individually, but the
        // total is rounded from the raw sum 26.694575.
        let breakdown = calculate_totals(&[item(dec!(19.995), 1)], None, None);
        assert_eq!(breakdown.subtotal, dec!(20.00));
        assert_eq!(breakdown.tax, dec!(1.70));
        assert_eq!(breakdown.total, dec!(26.69));
    }

    #[test]
    fn negative_prices_clamp_at_the_subtotal() {
        let breakdown = calculate_totals(&[item(dec!(-10.00), 1)], None, None);
        assert_eq!(breakdown.subtotal, dec!(0.00));
        assert_eq!(breakdown.tax, dec!(0.00));
        assert_eq!(breakdown.total, dec!(5.00));
    }

    #[test]
    fn address_does_not_change_the_flat_fee() {
        let address = Address {
            state: "AK".to_owned(),
            ..Address::default()
        };
        let with = calculate_totals(&[item(dec!(100.00), 1)], Some(&address), None);
        let without = calculate_totals(&[item(dec!(100.00), 1)], None, None);
        assert_eq!(with, without);
    }
}
