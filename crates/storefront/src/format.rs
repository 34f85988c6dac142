//! Display formatting helpers.
//!
//! Presentation-side utilities shared by anything that renders storefront
//! data: US dollar prices with thousands grouping, long-form dates, and
//! small text transforms.

use chrono::{DateTime, Utc};
use evershop_core::round_cents;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;

/// Formats a money amount as US dollars, for example `$1,234.56`.
#[must_use]
pub fn format_price(amount: Decimal) -> String {
    let rounded = round_cents(amount);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    format!("{sign}${}.{frac_part}", group_thousands(int_part))
}

fn group_thousands(digits: &str) -> String {
    let chars: Vec<char> = digits.chars().collect();
    let mut grouped = String::with_capacity(chars.len() + chars.len() / 3);
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }
    grouped
}

/// Long-form date, for example `January 15, 2024`.
#[must_use]
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Shortens text to at most `max_chars`, cutting at a word boundary and
/// appending an ellipsis. Text within the limit comes back unchanged.
#[must_use]
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_owned();
    }
    let cut: String = text.chars().take(max_chars).collect();
    let trimmed = cut
        .rfind(' ')
        .and_then(|pos| cut.get(..pos))
        .unwrap_or(cut.as_str());
    format!("{}...", trimmed.trim_end())
}

/// URL slug: lowercased ASCII alphanumerics joined by single hyphens.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }
    slug
}

/// Uppercases the first character, leaving the rest untouched.
#[must_use]
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Whole percent off the original price, rounded half away from zero.
///
/// Returns 0 when the original price is not positive or the sale price
/// is not below it.
#[must_use]
pub fn discount_percent(original: Decimal, sale: Decimal) -> u32 {
    if original <= Decimal::ZERO || sale >= original {
        return 0;
    }
    let percent = (original - sale) / original * dec!(100);
    percent
        .round_dp_with_strategy(0, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .unwrap_or(0)
}

// =============================================================================
// Tests
// =============================================================================
