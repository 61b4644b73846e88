//! # Domain Types
//!
//! Core domain types used by both checkout widgets.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ PaymentGateway  │   │    Currency     │   │  GatewayInfo    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Stripe         │   │  USD (default)  │   │  id             │       │
//! │  │  Paypal         │   │  EUR            │   │  name           │       │
//! │  └─────────────────┘   │  GBP            │   │  logo           │       │
//! │                        │  JPY            │   │  description    │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌──────────────────────────────┐   ┌───────────────────────────────┐  │
//! │  │        PaymentInput          │   │      SettlementOutcome        │  │
//! │  │  ──────────────────────────  │   │  ───────────────────────────  │  │
//! │  │  amount, currency, gateway   │──►│  Success { transaction_id }   │  │
//! │  │  card_number, expiry_date    │   │  Failure { message, code }    │  │
//! │  │  cvv, card_holder            │   │                               │  │
//! │  └──────────────────────────────┘   └───────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Catalog Lookup
//! The gateway catalog is a fixed table indexed by the enum tag. Finding the
//! display record for an identifier is a `match`, never a search.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::CoreError;
use crate::format::mask_card_number;
use crate::{PAYMENT_DECLINED_CODE, PAYMENT_DECLINED_MESSAGE};

// =============================================================================
// Payment Gateway
// =============================================================================

/// Payment method identifiers offered by the widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum PaymentGateway {
    /// Card payments through Stripe.
    #[default]
    Stripe,
    /// PayPal account payments.
    Paypal,
}

impl PaymentGateway {
    /// Every catalog entry, in display order.
    pub const ALL: [PaymentGateway; 2] = [PaymentGateway::Stripe, PaymentGateway::Paypal];

    /// Returns the wire identifier (`"stripe"`, `"paypal"`).
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentGateway::Stripe => "stripe",
            PaymentGateway::Paypal => "paypal",
        }
    }

    /// Returns the static catalog record for this gateway.
    pub fn info(&self) -> &'static GatewayInfo {
        match self {
            PaymentGateway::Stripe => &GATEWAY_CATALOG[0],
            PaymentGateway::Paypal => &GATEWAY_CATALOG[1],
        }
    }
}

impl fmt::Display for PaymentGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentGateway {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "stripe" => Ok(PaymentGateway::Stripe),
            "paypal" => Ok(PaymentGateway::Paypal),
            other => Err(CoreError::UnknownGateway(other.to_string())),
        }
    }
}

// =============================================================================
// Gateway Catalog
// =============================================================================

/// Display record for one catalog gateway. Read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GatewayInfo {
    pub id: PaymentGateway,
    /// Display name shown on cards and toggle buttons.
    pub name: &'static str,
    /// Icon glyph.
    pub logo: &'static str,
    pub description: &'static str,
}

/// The fixed gateway catalog, indexed in `PaymentGateway::ALL` order.
pub static GATEWAY_CATALOG: [GatewayInfo; 2] = [
    GatewayInfo {
        id: PaymentGateway::Stripe,
        name: "Stripe",
        logo: "💳",
        description: "Fast, secure payments",
    },
    GatewayInfo {
        id: PaymentGateway::Paypal,
        name: "PayPal",
        logo: "🅿️",
        description: "Pay with PayPal account",
    },
];

// =============================================================================
// Currency
// =============================================================================

/// Supported display currencies (ISO 4217 codes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[allow(clippy::upper_case_acronyms)]
pub enum Currency {
    #[default]
    USD,
    EUR,
    GBP,
    JPY,
}

impl Currency {
    pub const ALL: [Currency; 4] = [Currency::USD, Currency::EUR, Currency::GBP, Currency::JPY];

    /// Returns the ISO code.
    pub const fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "USD" => Ok(Currency::USD),
            "EUR" => Ok(Currency::EUR),
            "GBP" => Ok(Currency::GBP),
            "JPY" => Ok(Currency::JPY),
            other => Err(CoreError::UnknownCurrency(other.to_string())),
        }
    }
}

// =============================================================================
// Payment Input
// =============================================================================

/// The record a form submission packages for settlement.
///
/// Built fresh from the current field values on every submit and dropped
/// once the settlement attempt produced its outcome.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInput {
    /// Amount as entered/configured (free text, e.g. "50.00").
    pub amount: String,
    pub currency: Currency,
    pub gateway: PaymentGateway,
    /// Card digits with all spaces removed.
    pub card_number: String,
    /// Expiry as displayed (`MM/YY`).
    pub expiry_date: String,
    pub cvv: String,
    pub card_holder: String,
}

/// Card number and CVV never reach logs in clear text.
impl fmt::Debug for PaymentInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentInput")
            .field("amount", &self.amount)
            .field("currency", &self.currency)
            .field("gateway", &self.gateway)
            .field("card_number", &mask_card_number(&self.card_number))
            .field("expiry_date", &self.expiry_date)
            .field("cvv", &"***")
            .field("card_holder", &self.card_holder)
            .finish()
    }
}

// =============================================================================
// Settlement Outcome
// =============================================================================

/// Result of one settlement attempt. Exactly one per submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettlementOutcome {
    /// Payment accepted.
    Success {
        transaction_id: String,
        input: PaymentInput,
    },
    /// Payment declined.
    Failure {
        error_message: String,
        error_code: String,
    },
}

impl SettlementOutcome {
    /// The standard decline outcome.
    pub fn declined() -> Self {
        SettlementOutcome::Failure {
            error_message: PAYMENT_DECLINED_MESSAGE.to_string(),
            error_code: PAYMENT_DECLINED_CODE.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SettlementOutcome::Success { .. })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_input() -> PaymentInput {
        PaymentInput {
            amount: "50.00".to_string(),
            currency: Currency::USD,
            gateway: PaymentGateway::Stripe,
            card_number: "4242424242424242".to_string(),
            expiry_date: "12/25".to_string(),
            cvv: "123".to_string(),
            card_holder: "John Doe".to_string(),
        }
    }

    #[test]
    fn test_gateway_catalog_lookup() {
        for gateway in PaymentGateway::ALL {
            assert_eq!(gateway.info().id, gateway);
        }
        assert_eq!(PaymentGateway::Stripe.info().name, "Stripe");
        assert_eq!(PaymentGateway::Paypal.info().description, "Pay with PayPal account");
    }

    #[test]
    fn test_gateway_parsing() {
        assert_eq!("stripe".parse::<PaymentGateway>().unwrap(), PaymentGateway::Stripe);
        assert_eq!(" PayPal ".parse::<PaymentGateway>().unwrap(), PaymentGateway::Paypal);
        assert!(matches!(
            "square".parse::<PaymentGateway>(),
            Err(CoreError::UnknownGateway(_))
        ));
    }

    #[test]
    fn test_gateway_serde_uses_wire_names() {
        let json = serde_json::to_string(&PaymentGateway::Paypal).unwrap();
        assert_eq!(json, "\"paypal\"");
        assert_eq!(PaymentGateway::default(), PaymentGateway::Stripe);
    }

    #[test]
    fn test_currency_parsing() {
        assert_eq!("eur".parse::<Currency>().unwrap(), Currency::EUR);
        assert_eq!("JPY".parse::<Currency>().unwrap(), Currency::JPY);
        assert!("CHF".parse::<Currency>().is_err());
        assert_eq!(Currency::default(), Currency::USD);
        assert_eq!(serde_json::to_string(&Currency::GBP).unwrap(), "\"GBP\"");
    }

    #[test]
    fn test_payment_input_debug_masks_card_data() {
        let debug = format!("{:?}", sample_input());
        assert!(!debug.contains("4242424242424242"));
        assert!(!debug.contains("\"123\""));
        assert!(debug.contains("************4242"));
        assert!(debug.contains("John Doe"));
    }

    #[test]
    fn test_payment_input_serializes_camel_case() {
        let json = serde_json::to_value(sample_input()).unwrap();
        assert_eq!(json["cardHolder"], "John Doe");
        assert_eq!(json["expiryDate"], "12/25");
        assert_eq!(json["currency"], "USD");
    }

    #[test]
    fn test_declined_outcome() {
        let outcome = SettlementOutcome::declined();
        assert!(!outcome.is_success());
        assert_eq!(
            outcome,
            SettlementOutcome::Failure {
                error_message: "Payment declined".to_string(),
                error_code: "PAYMENT_DECLINED".to_string(),
            }
        );
    }
}
