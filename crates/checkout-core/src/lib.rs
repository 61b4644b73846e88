//! # checkout-core: Pure Logic for the Checkout Widgets
//!
//! This crate holds everything about the checkout widgets that can be
//! expressed as pure functions: the gateway catalog, the currency set, the
//! payment input record, the as-you-type input formatting, and the
//! required-field checks.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Checkout Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Host (web page / demo binary)                │   │
//! │  │    draws views ──► forwards clicks, keystrokes, submits         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    checkout-ui (widgets)                        │   │
//! │  │    GatewaySelector, PaymentForm, EventTree, Settlement          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ checkout-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │   types   │  │  format   │  │ validation│                  │   │
//! │  │   │  Gateway  │  │ card no.  │  │ required  │                  │   │
//! │  │   │  Currency │  │ expiry    │  │ fields    │                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO TIMERS • NO RANDOMNESS • PURE FUNCTIONS          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (PaymentGateway, Currency, PaymentInput, ...)
//! - [`format`] - As-you-type formatting for card number and expiry fields
//! - [`validation`] - Required-field checks
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use checkout_core::format::{format_card_number, format_expiry};
//! use checkout_core::PaymentGateway;
//!
//! assert_eq!(format_card_number("4242424242424242"), "4242 4242 4242 4242");
//! assert_eq!(format_expiry("1225"), "12/25");
//! assert_eq!(PaymentGateway::Paypal.info().name, "PayPal");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod format;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, ValidationError};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Number of digits per group in a formatted card number.
pub const CARD_GROUP_SIZE: usize = 4;

/// Separator inserted between expiry month and year.
pub const EXPIRY_SEPARATOR: char = '/';

/// Maximum number of characters the CVV field accepts.
pub const CVV_MAX_LENGTH: usize = 4;

/// Amount submitted when neither the host nor the form supplies one.
pub const FALLBACK_AMOUNT: &str = "0";

/// Error code carried by a declined payment.
pub const PAYMENT_DECLINED_CODE: &str = "PAYMENT_DECLINED";

/// Error message carried by a declined payment.
pub const PAYMENT_DECLINED_MESSAGE: &str = "Payment declined";
