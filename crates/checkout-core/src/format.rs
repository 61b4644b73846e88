//! # Input Formatting
//!
//! As-you-type formatting for the card-detail fields.
//!
//! ## Field Behaviour
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Formatting on every input event                     │
//! │                                                                         │
//! │  Card number                                                           │
//! │  ───────────                                                           │
//! │  "4242-4242 42a4242"  ──► strip non-digits ──► "42424242424242"        │
//! │                            group by 4         "4242 4242 4242 42"      │
//! │                                                                         │
//! │  Expiry                                                                │
//! │  ──────                                                                │
//! │  "1"      ──► "1"       (fewer than 2 digits: unchanged)               │
//! │  "12"     ──► "12/"     (separator appears after the 2nd digit)        │
//! │  "12/345" ──► "12/34"   (at most 4 digits)                             │
//! │                                                                         │
//! │  CVV                                                                   │
//! │  ───                                                                   │
//! │  "12345"  ──► "1234"    (native maxlength, no digit filtering)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All functions are pure: the widget replaces the field's displayed value
//! with the returned string.

use crate::{CARD_GROUP_SIZE, EXPIRY_SEPARATOR};

/// Keeps only ASCII digits.
fn digits_only(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Reformats a card number into space-separated groups of four digits.
///
/// Every non-digit character is dropped; the last group may be shorter.
///
/// ## Example
/// ```rust
/// use checkout_core::format::format_card_number;
///
/// assert_eq!(format_card_number("4242424242424242"), "4242 4242 4242 4242");
/// assert_eq!(format_card_number("4242 42x"), "4242 42");
/// assert_eq!(format_card_number(""), "");
/// ```
pub fn format_card_number(raw: &str) -> String {
    let digits = digits_only(raw);
    let mut formatted = String::with_capacity(digits.len() + digits.len() / CARD_GROUP_SIZE);

    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && i % CARD_GROUP_SIZE == 0 {
            formatted.push(' ');
        }
        formatted.push(digit);
    }

    formatted
}

/// Removes all whitespace, turning a displayed card number back into digits.
pub fn strip_whitespace(value: &str) -> String {
    value.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Reformats an expiry date into the `MM/YY` shape.
///
/// ## Rules
/// - Non-digits are dropped
/// - With two or more digits, a `/` follows the second digit
/// - At most four digits are kept
///
/// ## Example
/// ```rust
/// use checkout_core::format::format_expiry;
///
/// assert_eq!(format_expiry("1"), "1");
/// assert_eq!(format_expiry("12"), "12/");
/// assert_eq!(format_expiry("12/2"), "12/2");
/// assert_eq!(format_expiry("122599"), "12/25");
/// ```
pub fn format_expiry(raw: &str) -> String {
    let digits = digits_only(raw);

    if digits.len() < 2 {
        return digits;
    }

    let year_end = digits.len().min(4);
    let mut formatted = String::with_capacity(5);
    formatted.push_str(&digits[..2]);
    formatted.push(EXPIRY_SEPARATOR);
    formatted.push_str(&digits[2..year_end]);
    formatted
}

/// Truncates a value to at most `max` characters, like a native `maxlength`.
pub fn truncate_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

/// Masks every digit except the last four.
///
/// Numbers of four digits or fewer are masked entirely.
pub fn mask_card_number(digits: &str) -> String {
    let len = digits.chars().count();
    if len <= 4 {
        return "*".repeat(len);
    }

    let visible: String = digits.chars().skip(len - 4).collect();
    format!("{}{}", "*".repeat(len - 4), visible)
}

// =============================================================================
// Unit Tests
// =============================================================================
