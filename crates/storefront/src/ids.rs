//! Random identifier generation.
//!
//! Entity ids are short base36 strings, matching the ids found in
//! previously persisted wishlists, reviews and orders.

use chrono::{DateTime, Utc};
use evershop_core::OrderId;
use rand::Rng;

/// Length of a generated entity id.
const ENTITY_ID_LEN: usize = 9;

/// Length of the random suffix in an order id.
const ORDER_SUFFIX_LEN: usize = 6;

/// Random lowercase base36 string of the given length.
pub(crate) fn random_base36(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| char::from_digit(rng.random_range(0..36), 36).unwrap_or('0'))
        .collect()
}

/// Nine character base36 id for wishlist entries, reviews and users.
pub(crate) fn entity_id() -> String {
    random_base36(ENTITY_ID_LEN)
}

/// Order id in the form `<unix-millis>-<BASE36 suffix>`.
///
/// The millisecond prefix keeps ids sortable by placement time; the
/// uppercased suffix disambiguates orders placed in the same instant.
pub(crate) fn order_id(placed_at: DateTime<Utc>) -> OrderId {
    let suffix = random_base36(ORDER_SUFFIX_LEN).to_ascii_uppercase();
    OrderId::new(format!("{}-{}", placed_at.timestamp_millis(), suffix))
}

/// Tracking number in the form `TRK<unix-millis>`.
pub(crate) fn tracking_number(placed_at: DateTime<Utc>) -> String {
    format!("TRK{}", placed_at.timestamp_millis())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn entity_ids_are_nine_lowercase_base36_chars() {
        for _ in 0..50 {
            let id = entity_id();
            assert_eq!(id.len(), 9);
            assert!(
                id.chars()
                    .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
            );
        }
    }

    #[test]
    fn entity_ids_are_not_constant() {
        let ids: std::collections::HashSet<String> = (0..20).map(|_| entity_id()).collect();
        assert!(ids.len() > 1);
    }

    #[test]
    fn order_id_embeds_placement_millis() {
        let placed_at = Utc::now();
        let id = order_id(placed_at);
        let (millis, suffix) = id.as_str().split_once('-').unwrap();
        assert_eq!(millis.parse::<i64>().unwrap(), placed_at.timestamp_millis());
        assert_eq!(suffix.len(), 6);
        assert!(
            suffix
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
        );
    }

    #[test]
    fn tracking_number_uses_trk_prefix() {
        let placed_at = Utc::now();
        let tracking = tracking_number(placed_at);
        assert_eq!(
            tracking,
            format!("TRK{}", placed_at.timestamp_millis())
        );
    }
}
