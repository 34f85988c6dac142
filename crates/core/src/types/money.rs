//! Decimal money helpers.
//!
//! All monetary amounts in the system are `rust_decimal::Decimal` values in
//! the currency's standard unit (dollars, not cents). Derived amounts (tax,
//! percentage discounts) can carry more than two fractional digits until
//! they are rounded for presentation or storage.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of fractional digits in a stored monetary amount.
pub const CENT_PRECISION: u32 = 2;

/// Round a monetary amount to cents.
///
/// Uses round-half-up (midpoint away from zero), the rounding every stored
/// breakdown field goes through.
#[must_use]
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CENT_PRECISION, RoundingStrategy::MidpointAwayFromZero)
}
