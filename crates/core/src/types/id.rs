//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types.

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>`, `From<&str>`, and `AsRef<str>` implementations
///
/// IDs are strings because every entity in the system carries an opaque
/// generated identifier (timestamp-plus-suffix for orders, base-36 tokens
/// for users and reviews) rather than a database sequence.
///
/// # Example
///
/// ```rust
/// # use evershop_core::define_id;
/// define_id!(CouponId);
/// define_id!(ShipmentId);
///
/// let coupon = CouponId::new("save10");
/// let shipment = ShipmentId::new("shp-1");
///
/// // These are different types, so this won't compile:
/// // let _: CouponId = shipment;
/// # assert_eq!(coupon.as_str(), "save10");
/// # assert_eq!(shipment.as_str(), "shp-1");
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(ProductId);
define_id!(UserId);
define_id!(OrderId);
define_id!(ReviewId);

impl UserId {
    /// The identifier recorded on orders placed without a signed-in user.
    pub const GUEST: &'static str = "guest-user";

    /// The guest (not-signed-in) user identifier.
    #[must_use]
    pub fn guest() -> Self {
        Self::new(Self::GUEST)
    }

    /// Whether this is the guest identifier.
    #[must_use]
    pub fn is_guest(&self) -> bool {
        self.as_str() == Self::GUEST
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_distinct_types() {
        let product = ProductId::new("air-max-90");
        let order = OrderId::new("1700000000000-A4H137");
        assert_eq!(product.as_str(), "air-max-90");
        assert_eq!(order.as_str(), "1700000000000-A4H137");
    }

    #[test]
    fn test_display_matches_inner() {
        let id = ProductId::new("react-infinity");
        assert_eq!(format!("{id}"), "react-infinity");
    }

    #[test]
    fn test_serde_transparent() {
        let id = UserId::new("k3j9x2m1q");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"k3j9x2m1q\"");

        let parsed: UserId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_from_conversions() {
        let from_str: ProductId = "pegasus-40".into();
        let from_string: ProductId = String::from("pegasus-40").into();
        assert_eq!(from_str, from_string);

        let back: String = from_str.into();
        assert_eq!(back, "pegasus-40");
    }

    #[test]
    fn test_guest_user() {
        let guest = UserId::guest();
        assert_eq!(guest.as_str(), "guest-user");
        assert!(guest.is_guest());
        assert!(!UserId::new("k3j9x2m1q").is_guest());
    }
}
