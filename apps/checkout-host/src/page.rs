//! # Checkout Page
//!
//! A host page with both widgets mounted inside one shadow root.
//!
//! ```text
//! document
//!   └── checkout-page            ◄── page listener (gateway-selected)
//!         └── #shadow-root
//!               ├── gateway-selector
//!               └── payment-form ◄── form listener (payment-*, gateway-change)
//! ```

use std::sync::Arc;

use checkout_ui::{
    EventListener, EventSink, EventTree, GatewaySelector, NodeId, PaymentForm,
    SimulatedSettlement, WidgetConfig, WidgetEvent,
};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::error::HostResult;

/// Mounted widgets plus the tree they dispatch into.
pub struct CheckoutPage {
    tree: Arc<EventTree>,
    node: NodeId,
    page_events: EventListener,
    pub selector: GatewaySelector,
    pub form: PaymentForm,
}

impl CheckoutPage {
    /// Builds the page tree and mounts both widgets.
    pub fn mount(config: &WidgetConfig) -> HostResult<Self> {
        let tree = Arc::new(EventTree::new());
        let node = tree.append_element(tree.root(), "checkout-page")?;
        let shadow = tree.attach_shadow(node)?;
        let selector_node = tree.append_element(shadow, "gateway-selector")?;
        let form_node = tree.append_element(shadow, "payment-form")?;

        let sink: Arc<dyn EventSink> = tree.clone();
        let settlement = Arc::new(SimulatedSettlement::from_config(&config.settlement)?);

        let selector = GatewaySelector::new(Arc::clone(&sink), selector_node);
        selector.set_gateway(Some(config.form.gateway));

        let form = PaymentForm::with_defaults(&config.form, settlement, sink, form_node);
        let page_events = tree.listen(node)?;

        info!(
            latency_ms = config.settlement.latency_ms,
            success_rate = config.settlement.success_rate,
            gateway = %config.form.gateway,
            "Checkout page mounted"
        );

        Ok(CheckoutPage {
            tree,
            node,
            page_events,
            selector,
            form,
        })
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Handles queued page-level events. Returns how many were handled.
    ///
    /// A `gateway-selected` from the selector becomes the form's active
    /// gateway.
    pub fn pump(&mut self) -> usize {
        let events = self.page_events.drain();
        for dispatched in &events {
            match &dispatched.event {
                WidgetEvent::GatewaySelected(detail) => {
                    info!(gateway = %detail.gateway, "Page applying selected gateway to form");
                    self.form.set_gateway(detail.gateway);
                }
                other => warn!(event = other.name(), "Unexpected event at page level"),
            }
        }
        events.len()
    }

    /// Spawns a task logging every notification of the form.
    ///
    /// The task ends once the page is dropped.
    pub fn spawn_form_logger(&self) -> HostResult<JoinHandle<usize>> {
        let mut listener = self.tree.listen(self.form.node())?;

        Ok(tokio::spawn(async move {
            let mut seen = 0;
            while let Some(dispatched) = listener.recv().await {
                seen += 1;
                match dispatched.event.to_json() {
                    Ok(json) => info!(
                        event = dispatched.event.name(),
                        at = %dispatched.dispatched_at,
                        %json,
                        "Form notification"
                    ),
                    Err(e) => warn!(error = %e, "Failed to serialize form notification"),
                }
            }
            seen
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkout_core::PaymentGateway;

    #[tokio::test]
    async fn test_selection_drives_form_gateway() {
        let mut page = CheckoutPage::mount(&WidgetConfig::default()).unwrap();
        assert_eq!(page.selector.selected_gateway(), Some(PaymentGateway::Stripe));
        assert_eq!(page.form.gateway(), PaymentGateway::Stripe);

        page.selector.select_gateway(PaymentGateway::Paypal);
        // Form-local toggle never reaches the page
        page.form.select_gateway(PaymentGateway::Stripe);

        assert_eq!(page.pump(), 1);
        assert_eq!(page.form.gateway(), PaymentGateway::Paypal);
    }

    #[tokio::test]
    async fn test_form_logger_ends_with_page() {
        let page = CheckoutPage::mount(&WidgetConfig::default()).unwrap();
        let logger = page.spawn_form_logger().unwrap();

        page.form.select_gateway(PaymentGateway::Paypal);
        drop(page);

        assert_eq!(logger.await.unwrap(), 1);
    }
}
