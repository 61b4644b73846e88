//! # checkout-ui: Headless Checkout Widgets
//!
//! Stateful checkout widgets. Each widget owns its state, exposes the user
//! interactions a host forwards (click, type, submit), describes itself as a
//! serializable view, and dispatches notifications into an [`EventTree`].
//!
//! ## Page Wiring
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           Checkout Page                                 │
//! │                                                                         │
//! │   page listener ◄──────────── gateway-selected (bubbles, composed)     │
//! │        │                              ▲                                 │
//! │        │ form.set_gateway()           │                                 │
//! │        ▼                              │                                 │
//! │  ┌────────────────────────┐   ┌───────┴────────────────┐               │
//! │  │      PaymentForm       │   │    GatewaySelector     │               │
//! │  │                        │   │                        │               │
//! │  │  submit() ──► Settlement (async, latency + random outcome)          │
//! │  │      │                 │   └────────────────────────┘               │
//! │  │      └──► payment-success / payment-error (local)                   │
//! │  └────────────────────────┘                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`selector`] - Gateway picker
//! - [`form`] - Payment form and its submission lifecycle
//! - [`settlement`] - Settlement seam and the simulated implementation
//! - [`tree`] - Event tree with bubbling and shadow boundaries
//! - [`events`] - Notification payloads
//! - [`config`] - TOML + environment configuration
//! - [`error`] - Error types

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod events;
pub mod form;
pub mod selector;
pub mod settlement;
pub mod tree;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{FormDefaults, SettlementSettings, WidgetConfig};
pub use error::{SettlementError, WidgetError, WidgetResult};
pub use events::{EventInit, GatewayDetail, PaymentErrorDetail, PaymentSuccessDetail, WidgetEvent};
pub use form::{FormField, FormMessage, FormView, MessageKind, PaymentForm, SubmitOutcome};
pub use selector::{GatewaySelector, SelectorView};
pub use settlement::{Settlement, SimulatedSettlement};
pub use tree::{DispatchedEvent, EventListener, EventSink, EventTree, NoOpSink, NodeId, NodeKind};
