//! Payment instruments for checkout and order records.
//!
//! Full card details only ever live in memory while a checkout is in
//! progress. The persisted form is [`PaymentSummary`], which carries a
//! masked card number and no CVV.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Prefix used when masking a stored card number.
pub const CARD_MASK_PREFIX: &str = "****-****-****-";

/// Card details captured by the checkout payment form.
///
/// Deliberately not serializable; the CVV is held in a [`SecretString`]
/// and must never reach the persistence layer.
pub struct CardDetails {
    /// Card number as entered.
    pub number: String,
    /// Two-digit expiry month as entered.
    pub expiry_month: String,
    /// Expiry year as entered.
    pub expiry_year: String,
    /// Card verification value.
    pub cvv: SecretString,
    /// Cardholder name.
    pub name_on_card: String,
}

impl CardDetails {
    /// Returns `true` when every card field is non-empty.
    ///
    /// Values are checked as entered; no Luhn or expiry validation runs.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.number.is_empty()
            && !self.expiry_month.is_empty()
            && !self.expiry_year.is_empty()
            && !self.cvv.expose_secret().is_empty()
            && !self.name_on_card.is_empty()
    }

    /// Masks the card number down to its last four characters.
    #[must_use]
    pub fn masked_number(&self) -> String {
        let skip = self.number.chars().count().saturating_sub(4);
        let tail: String = self.number.chars().skip(skip).collect();
        format!("{CARD_MASK_PREFIX}{tail}")
    }
}

impl Default for CardDetails {
    fn default() -> Self {
        Self {
            number: String::new(),
            expiry_month: String::new(),
            expiry_year: String::new(),
            cvv: SecretString::from(String::new()),
            name_on_card: String::new(),
        }
    }
}

impl Clone for CardDetails {
    fn clone(&self) -> Self {
        Self {
            number: self.number.clone(),
            expiry_month: self.expiry_month.clone(),
            expiry_year: self.expiry_year.clone(),
            cvv: SecretString::from(self.cvv.expose_secret().to_owned()),
            name_on_card: self.name_on_card.clone(),
        }
    }
}

impl fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardDetails")
            .field("number", &"[REDACTED]")
            .field("expiry_month", &self.expiry_month)
            .field("expiry_year", &self.expiry_year)
            .field("cvv", &"[REDACTED]")
            .field("name_on_card", &self.name_on_card)
            .finish()
    }
}

/// Payment instrument selected during checkout.
#[derive(Debug, Clone)]
pub enum PaymentMethod {
    /// Pay by card. Carries the full form state.
    Card(CardDetails),
    /// Pay with cash on delivery. Needs no further details.
    Cash,
}

impl Default for PaymentMethod {
    fn default() -> Self {
        Self::Card(CardDetails::default())
    }
}

impl PaymentMethod {
    /// Returns `true` when the instrument is ready for order placement.
    ///
    /// Cash is always valid; card requires every form field.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        match self {
            Self::Cash => true,
            Self::Card(card) => card.is_complete(),
        }
    }

    /// Converts the instrument into its storable form, masking the card
    /// number and dropping the CVV.
    #[must_use]
    pub fn to_summary(&self) -> PaymentSummary {
        match self {
            Self::Cash => PaymentSummary::Cash,
            Self::Card(card) => PaymentSummary::Card {
                card_number: card.masked_number(),
                expiry_month: card.expiry_month.clone(),
                expiry_year: card.expiry_year.clone(),
                name_on_card: card.name_on_card.clone(),
            },
        }
    }
}

/// Persisted form of a payment instrument.
///
/// The card number is stored masked and the CVV is never stored at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PaymentSummary {
    /// Masked card record.
    #[serde(rename_all = "camelCase")]
    Card {
        /// Masked card number, for example `****-****-****-1111`.
        card_number: String,
        /// Two-digit expiry month.
        expiry_month: String,
        /// Expiry year.
        expiry_year: String,
        /// Cardholder name.
        name_on_card: String,
    },
    /// Cash on delivery.
    Cash,
}

// =============================================================================
// Tests
// =============================================================================
