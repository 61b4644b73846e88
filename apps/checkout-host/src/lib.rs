//! # Checkout Host Library
//!
//! Demo host for the checkout widgets. Mounts both widgets on a page, runs
//! a scripted checkout against the simulated settlement, and logs every
//! view and notification.
//!
//! ## Module Organization
//! ```text
//! checkout_host/
//! ├── lib.rs      ◄─── You are here (startup & scripted checkout)
//! ├── page.rs     ◄─── Page tree, widget mounting, event wiring
//! └── error.rs    ◄─── Host error type
//! ```
//!
//! ## Environment
//! - `CHECKOUT_CONFIG` - explicit path of the config file
//! - `CHECKOUT_*` - per-setting overrides (see `checkout_ui::config`)
//! - `RUST_LOG` - log filter

pub mod error;
pub mod page;

use std::path::PathBuf;

use checkout_core::PaymentGateway;
use checkout_ui::{FormField, SubmitOutcome, WidgetConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use error::{HostError, HostResult};
use page::CheckoutPage;

/// Card details typed by the scripted shopper.
const SCRIPTED_CARD: [(FormField, &str); 4] = [
    (FormField::CardHolder, "John Doe"),
    (FormField::CardNumber, "4242424242424242"),
    (FormField::Expiry, "1225"),
    (FormField::Cvv, "123"),
];

/// Runs the demo host.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                          Host Startup                                   │
/// │                                                                         │
/// │  1. Initialize Logging (RUST_LOG, default info,checkout=debug)         │
/// │  2. Load WidgetConfig (file → CHECKOUT_* env → validate)               │
/// │  3. Mount page: selector + form under one shadow root                  │
/// │  4. Script: pick PayPal, submit empty form, fill card, submit twice    │
/// │  5. Drop page, wait for the form logger to drain                       │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> HostResult<()> {
    init_tracing();

    info!("Starting checkout host");

    let config = WidgetConfig::load_or_default(config_path_override());
    let mut page = CheckoutPage::mount(&config)?;
    let logger = page.spawn_form_logger()?;

    log_view("selector", &page.selector.render());

    // Shopper picks PayPal in the selector; the page forwards it to the form
    page.selector.select_gateway(PaymentGateway::Paypal);
    page.pump();

    // Submitting before typing anything is blocked by the required fields
    if let Err(e) = page.form.submit().await {
        warn!(error = %HostError::from(e).to_json(), "Submit blocked");
    }

    for (field, raw) in SCRIPTED_CARD {
        let shown = page.form.input(field, raw);
        info!(field = field.id(), %shown, "Field typed");
    }
    log_view("form", &page.form.render());

    // A second click while processing is ignored
    let (first, second) = tokio::join!(page.form.submit(), page.form.submit());
    for outcome in [first, second] {
        match outcome.map_err(HostError::from)? {
            SubmitOutcome::Ignored => info!("Duplicate submit ignored"),
            SubmitOutcome::Settled(outcome) => {
                info!(success = outcome.is_success(), "Submission settled")
            }
            SubmitOutcome::Aborted(e) => warn!(error = %e, "Submission aborted"),
        }
    }
    log_view("form", &page.form.render());

    drop(page);
    let notifications = logger
        .await
        .map_err(|e| HostError::internal(e.to_string()))?;
    info!(notifications, "Checkout host finished");

    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=checkout_ui=trace` - Include every event dispatch
/// - Default: INFO, DEBUG for the checkout crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,checkout=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Explicit config path from `CHECKOUT_CONFIG`, if set.
fn config_path_override() -> Option<PathBuf> {
    std::env::var("CHECKOUT_CONFIG").ok().map(PathBuf::from)
}

fn log_view<T: serde::Serialize>(widget: &str, view: &T) {
    match serde_json::to_string(view) {
        Ok(json) => info!(widget, %json, "Rendered view"),
        Err(e) => warn!(widget, error = %e, "Failed to serialize view"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;

    // Only test in this binary that installs the global subscriber.
    #[test]
    fn test_rust_log_caps_max_level() {
        std::env::set_var("RUST_LOG", "error");
        init_tracing();

        assert_eq!(LevelFilter::current(), LevelFilter::ERROR);
        assert!(!tracing::enabled!(tracing::Level::DEBUG));
        assert!(tracing::enabled!(tracing::Level::ERROR));
    }
}
