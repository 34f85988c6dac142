//! Postal addresses for shipping and billing.

use serde::{Deserialize, Serialize};

/// Country pre-filled into new address forms.
pub const DEFAULT_COUNTRY: &str = "United States";

/// A shipping or billing address.
///
/// Modeled after the checkout form: every field is a plain string and
/// optional fields are simply left empty. Serialized with camelCase keys
/// to stay compatible with previously persisted data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    /// Recipient first name.
    pub first_name: String,
    /// Recipient last name.
    pub last_name: String,
    /// Company name, if any.
    pub company: String,
    /// Street address, first line.
    pub address1: String,
    /// Street address, second line (apartment, suite).
    pub address2: String,
    /// City.
    pub city: String,
    /// State or province.
    pub state: String,
    /// Postal code.
    pub zip_code: String,
    /// Country. Defaults to [`DEFAULT_COUNTRY`] and is not validated.
    pub country: String,
    /// Contact phone number, if any.
    pub phone: String,
}

impl Default for Address {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            company: String::new(),
            address1: String::new(),
            address2: String::new(),
            city: String::new(),
            state: String::new(),
            zip_code: String::new(),
            country: DEFAULT_COUNTRY.to_owned(),
            phone: String::new(),
        }
    }
}

impl Address {
    /// Returns `true` when every field the checkout shipping gate requires
    /// is non-empty.
    ///
    /// The required subset is first name, last name, street line 1, city,
    /// state and postal code. Company, second street line, phone and
    /// country never gate progress. Values are checked as entered, without
    /// trimming.
    #[must_use]
    pub fn has_required_fields(&self) -> bool {
        !self.first_name.is_empty()
            && !self.last_name.is_empty()
            && !self.address1.is_empty()
            && !self.city.is_empty()
            && !self.state.is_empty()
            && !self.zip_code.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================
