//! # Gateway Selector
//!
//! Presents the gateway catalog as a row of cards and tracks which one is
//! active.
//!
//! ## Interaction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Selected Payment Gateway: PayPal                                       │
//! │                                                                         │
//! │  ┌──────────────────────────┐  ┌──────────────────────────┐            │
//! │  │ 💳 Stripe                │  │ 🅿️ PayPal   ◄ selected   │            │
//! │  │ Fast, secure payments    │  │ Pay with PayPal account  │            │
//! │  └──────────────────────────┘  └──────────────────────────┘            │
//! │                                                                         │
//! │  click card ──► select_gateway() ──► gateway-selected (bubbles,        │
//! │                                       composed) on the selector node   │
//! │  host code ──► set_gateway()     ──► no notification                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use checkout_core::{PaymentGateway, GATEWAY_CATALOG};
use serde::Serialize;
use tracing::debug;
use ts_rs::TS;

use crate::events::{GatewayDetail, WidgetEvent};
use crate::tree::{EventSink, NodeId};

/// Header label shown above the selected gateway's name.
pub const SELECTED_LABEL: &str = "Selected Payment Gateway:";

// =============================================================================
// View
// =============================================================================

/// One catalog card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct GatewayCardView {
    pub id: PaymentGateway,
    pub name: String,
    pub logo: String,
    pub description: String,
    pub selected: bool,
}

/// Header naming the current selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct SelectionHeaderView {
    pub label: String,
    pub name: String,
}

/// Everything a host needs to draw the selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct SelectorView {
    pub selected: Option<SelectionHeaderView>,
    pub cards: Vec<GatewayCardView>,
}

// =============================================================================
// Gateway Selector
// =============================================================================

/// The gateway picker widget.
#[derive(Clone)]
pub struct GatewaySelector {
    selected: Arc<Mutex<Option<PaymentGateway>>>,
    sink: Arc<dyn EventSink>,
    node: NodeId,
}

impl GatewaySelector {
    /// Creates a selector with no selection, dispatching on `node`.
    pub fn new(sink: Arc<dyn EventSink>, node: NodeId) -> Self {
        GatewaySelector {
            selected: Arc::new(Mutex::new(None)),
            sink,
            node,
        }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Returns the current selection.
    pub fn selected_gateway(&self) -> Option<PaymentGateway> {
        *self.selected.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Sets the selection without notifying anyone.
    pub fn set_gateway(&self, gateway: Option<PaymentGateway>) {
        *self.selected.lock().unwrap_or_else(PoisonError::into_inner) = gateway;
    }

    /// User activation of a catalog card.
    ///
    /// Updates the selection, then dispatches `gateway-selected`. Re-selecting
    /// the current gateway still notifies.
    pub fn select_gateway(&self, gateway: PaymentGateway) {
        self.set_gateway(Some(gateway));
        debug!(%gateway, node = %self.node, "Gateway selected");

        self.sink.dispatch(
            self.node,
            WidgetEvent::GatewaySelected(GatewayDetail { gateway }),
        );
    }

    /// Produces the view of the current state.
    pub fn render(&self) -> SelectorView {
        let selected = self.selected_gateway();

        SelectorView {
            selected: selected.map(|g| SelectionHeaderView {
                label: SELECTED_LABEL.to_string(),
                name: g.info().name.to_string(),
            }),
            cards: GATEWAY_CATALOG
                .iter()
                .map(|info| GatewayCardView {
                    id: info.id,
                    name: info.name.to_string(),
                    logo: info.logo.to_string(),
                    description: info.description.to_string(),
                    selected: selected == Some(info.id),
                })
                .collect(),
        }
    }
}
