//! User domain types.

use evershop_core::{Email, UserId};
use serde::{Deserialize, Serialize};

/// A signed-in storefront user.
///
/// Produced by the simulated sign-in and registration flows and persisted
/// across sessions. Serialized with camelCase keys to stay compatible with
/// previously persisted data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Avatar image URL, if one was generated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl User {
    /// First and last name joined with a space.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

// =============================================================================
// Tests
// =============================================================================
