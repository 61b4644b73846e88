//! # Widget Notifications
//!
//! Notification types the widgets dispatch into the event tree.
//!
//! ## Event Catalog
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Widget Notifications                             │
//! │                                                                         │
//! │  GatewaySelector                                                       │
//! │  ───────────────                                                       │
//! │  gateway-selected  { gateway }            bubbles, composed            │
//! │                                                                         │
//! │  PaymentForm                                                           │
//! │  ───────────                                                           │
//! │  gateway-change    { gateway }            local only                   │
//! │  payment-success   { transactionId,       local only                   │
//! │                      gateway, amount,                                  │
//! │                      currency, cardHolder }                            │
//! │  payment-error     { error, code }        local only                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! Events serialize as adjacently tagged JSON, ready to be re-dispatched as
//! DOM `CustomEvent`s by a web host:
//! ```json
//! { "type": "payment-error", "detail": { "error": "Payment declined", "code": "PAYMENT_DECLINED" } }
//! ```

use checkout_core::{Currency, PaymentGateway};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Name of the selector's selection notification.
pub const GATEWAY_SELECTED: &str = "gateway-selected";
/// Name of the form's gateway toggle notification.
pub const GATEWAY_CHANGE: &str = "gateway-change";
/// Name of the form's success notification.
pub const PAYMENT_SUCCESS: &str = "payment-success";
/// Name of the form's failure notification.
pub const PAYMENT_ERROR: &str = "payment-error";

// =============================================================================
// Event Init
// =============================================================================

/// Propagation flags of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventInit {
    /// Propagates to ancestors after the target.
    pub bubbles: bool,
    /// Crosses shadow-root boundaries while bubbling.
    pub composed: bool,
}

impl EventInit {
    /// Target only.
    pub const LOCAL: EventInit = EventInit {
        bubbles: false,
        composed: false,
    };

    /// Bubbles through the whole tree, shadow boundaries included.
    pub const BUBBLING_COMPOSED: EventInit = EventInit {
        bubbles: true,
        composed: true,
    };
}

// =============================================================================
// Payloads
// =============================================================================

/// Detail of `gateway-selected` and `gateway-change`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GatewayDetail {
    pub gateway: PaymentGateway,
}

/// Detail of `payment-success`. Never carries card number or CVV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSuccessDetail {
    pub transaction_id: String,
    pub gateway: PaymentGateway,
    pub amount: String,
    pub currency: Currency,
    pub card_holder: String,
}

/// Detail of `payment-error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PaymentErrorDetail {
    pub error: String,
    pub code: String,
}

// =============================================================================
// Widget Event
// =============================================================================

/// Every notification a widget can dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", content = "detail")]
pub enum WidgetEvent {
    #[serde(rename = "gateway-selected")]
    GatewaySelected(GatewayDetail),

    #[serde(rename = "gateway-change")]
    GatewayChange(GatewayDetail),

    #[serde(rename = "payment-success")]
    PaymentSuccess(PaymentSuccessDetail),

    #[serde(rename = "payment-error")]
    PaymentError(PaymentErrorDetail),
}

impl WidgetEvent {
    /// Returns the DOM-style event name.
    pub fn name(&self) -> &'static str {
        match self {
            WidgetEvent::GatewaySelected(_) => GATEWAY_SELECTED,
            WidgetEvent::GatewayChange(_) => GATEWAY_CHANGE,
            WidgetEvent::PaymentSuccess(_) => PAYMENT_SUCCESS,
            WidgetEvent::PaymentError(_) => PAYMENT_ERROR,
        }
    }

    /// Returns how this event propagates.
    pub fn init(&self) -> EventInit {
        match self {
            WidgetEvent::GatewaySelected(_) => EventInit::BUBBLING_COMPOSED,
            WidgetEvent::GatewayChange(_)
            | WidgetEvent::PaymentSuccess(_)
            | WidgetEvent::PaymentError(_) => EventInit::LOCAL,
        }
    }

    /// Serializes the event to its JSON wire form.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_and_propagation() {
        let selected = WidgetEvent::GatewaySelected(GatewayDetail {
            gateway: PaymentGateway::Paypal,
        });
        assert_eq!(selected.name(), "gateway-selected");
        assert_eq!(selected.init(), EventInit::BUBBLING_COMPOSED);

        let change = WidgetEvent::GatewayChange(GatewayDetail {
            gateway: PaymentGateway::Stripe,
        });
        assert_eq!(change.name(), "gateway-change");
        assert!(!change.init().bubbles);
    }

    #[test]
    fn test_success_wire_format() {
        let event = WidgetEvent::PaymentSuccess(PaymentSuccessDetail {
            transaction_id: "txn_abc123xyz".into(),
            gateway: PaymentGateway::Stripe,
            amount: "50.00".into(),
            currency: Currency::USD,
            card_holder: "John Doe".into(),
        });

        let json: serde_json::Value = serde_json::from_str(&event.to_json().unwrap()).unwrap();
        assert_eq!(json["type"], "payment-success");
        assert_eq!(json["detail"]["transactionId"], "txn_abc123xyz");
        assert_eq!(json["detail"]["gateway"], "stripe");
        assert_eq!(json["detail"]["cardHolder"], "John Doe");
        assert!(json["detail"].get("cardNumber").is_none());
        assert!(json["detail"].get("cvv").is_none());
    }

    #[test]
    fn test_error_wire_format() {
        let event = WidgetEvent::PaymentError(PaymentErrorDetail {
            error: "Payment declined".into(),
            code: "PAYMENT_DECLINED".into(),
        });
        assert_eq!(
            event.to_json().unwrap(),
            r#"{"type":"payment-error","detail":{"error":"Payment declined","code":"PAYMENT_DECLINED"}}"#
        );
    }
}
