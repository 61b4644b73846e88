//! # Payment Form
//!
//! Card payment form with an amount header, a gateway toggle, the card
//! fields, and a single-flight asynchronous submission.
//!
//! ## Submission Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        PaymentForm::submit                              │
//! │                                                                         │
//! │   Idle ──submit()──► processing already? ──yes──► Ignored               │
//! │    ▲                          │ no                                      │
//! │    │                          ▼                                         │
//! │    │            required fields filled? ──no──► Err(Required)           │
//! │    │                          │ yes             (nothing changes)       │
//! │    │                          ▼                                         │
//! │    │        ┌──────── Processing ────────┐  submit control disabled     │
//! │    │        │ message cleared            │  "Processing..."             │
//! │    │        │ settlement.settle().await  │  form stays usable           │
//! │    │        └─────────────┬──────────────┘                              │
//! │    │          ┌───────────┼──────────────┐                              │
//! │    │          ▼           ▼              ▼                              │
//! │    │      Success      Failure      SettlementError                     │
//! │    │      message +    message +    generic message                     │
//! │    │      payment-     payment-     (logged, no event)                  │
//! │    │      success      error                                            │
//! │    │          └───────────┼──────────────┘                              │
//! │    └──────────────────────┘  processing cleared on every path,         │
//! │                              cancellation included                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Locking
//! Form state lives behind one mutex. The lock is taken for short critical
//! sections only and is never held across the settlement await.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use checkout_core::format::{format_card_number, format_expiry, strip_whitespace, truncate_chars};
use checkout_core::validation::first_missing;
use checkout_core::{
    CoreError, Currency, PaymentGateway, PaymentInput, SettlementOutcome, CVV_MAX_LENGTH,
    FALLBACK_AMOUNT, GATEWAY_CATALOG,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};
use ts_rs::TS;
use uuid::Uuid;

use crate::config::FormDefaults;
use crate::error::{SettlementError, WidgetResult};
use crate::events::{GatewayDetail, PaymentErrorDetail, PaymentSuccessDetail, WidgetEvent};
use crate::settlement::Settlement;
use crate::tree::{EventSink, NodeId};

/// Submit button label while idle.
pub const SUBMIT_LABEL: &str = "Process Payment";
/// Submit button label while a settlement is in flight.
pub const PROCESSING_LABEL: &str = "Processing...";
/// Message shown when a settlement fails unexpectedly.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred. Please try again.";
/// Message shown for a declined payment.
pub const DECLINED_MESSAGE: &str = "Payment failed. Please try again.";

// =============================================================================
// Fields
// =============================================================================

/// Input fields of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    /// Shown only when the host did not configure an amount.
    Amount,
    CardHolder,
    CardNumber,
    Expiry,
    Cvv,
}

impl FormField {
    /// Card fields in display order.
    pub const CARD_FIELDS: [FormField; 4] = [
        FormField::CardHolder,
        FormField::CardNumber,
        FormField::Expiry,
        FormField::Cvv,
    ];

    /// Element id of the field.
    pub const fn id(&self) -> &'static str {
        match self {
            FormField::Amount => "amount",
            FormField::CardHolder => "cardHolder",
            FormField::CardNumber => "cardNumber",
            FormField::Expiry => "expiry",
            FormField::Cvv => "cvv",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            FormField::Amount => "Amount",
            FormField::CardHolder => "Card Holder Name",
            FormField::CardNumber => "Card Number",
            FormField::Expiry => "Expiry Date",
            FormField::Cvv => "CVV",
        }
    }

    pub const fn placeholder(&self) -> &'static str {
        match self {
            FormField::Amount => "0.00",
            FormField::CardHolder => "John Doe",
            FormField::CardNumber => "1234 5678 9012 3456",
            FormField::Expiry => "MM/YY",
            FormField::Cvv => "123",
        }
    }

    pub const fn required(&self) -> bool {
        !matches!(self, FormField::Amount)
    }

    pub const fn max_length(&self) -> Option<usize> {
        match self {
            FormField::Cvv => Some(CVV_MAX_LENGTH),
            _ => None,
        }
    }

    /// Applies the field's as-you-type formatting.
    pub fn format(&self, raw: &str) -> String {
        match self {
            FormField::CardNumber => format_card_number(raw),
            FormField::Expiry => format_expiry(raw),
            FormField::Cvv => truncate_chars(raw, CVV_MAX_LENGTH),
            FormField::Amount | FormField::CardHolder => raw.to_string(),
        }
    }
}

/// Displayed field values. No `Debug`: holds the clear card number.
#[derive(Clone, Default, PartialEq, Eq)]
struct FieldValues {
    amount: String,
    card_holder: String,
    card_number: String,
    expiry: String,
    cvv: String,
}

impl FieldValues {
    fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Amount => &self.amount,
            FormField::CardHolder => &self.card_holder,
            FormField::CardNumber => &self.card_number,
            FormField::Expiry => &self.expiry,
            FormField::Cvv => &self.cvv,
        }
    }

    fn get_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Amount => &mut self.amount,
            FormField::CardHolder => &mut self.card_holder,
            FormField::CardNumber => &mut self.card_number,
            FormField::Expiry => &mut self.expiry,
            FormField::Cvv => &mut self.cvv,
        }
    }
}

// =============================================================================
// Messages
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Success,
    Error,
}

/// Status line under the gateway toggle. At most one is shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FormMessage {
    pub kind: MessageKind,
    pub text: String,
}

impl FormMessage {
    pub fn success(transaction_id: &str) -> Self {
        FormMessage {
            kind: MessageKind::Success,
            text: format!("Payment successful! Transaction ID: {transaction_id}"),
        }
    }

    pub fn declined() -> Self {
        FormMessage {
            kind: MessageKind::Error,
            text: DECLINED_MESSAGE.to_string(),
        }
    }

    pub fn unexpected() -> Self {
        FormMessage {
            kind: MessageKind::Error,
            text: GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}

// =============================================================================
// Form State
// =============================================================================

/// Mutable state of one form instance.
#[derive(Clone, Default)]
pub struct FormState {
    amount: String,
    currency: Currency,
    gateway: PaymentGateway,
    values: FieldValues,
    processing: bool,
    message: Option<FormMessage>,
}

impl FormState {
    fn from_defaults(defaults: &FormDefaults) -> Self {
        FormState {
            amount: defaults.amount.clone(),
            currency: defaults.currency,
            gateway: defaults.gateway,
            ..Default::default()
        }
    }

    /// Host-configured amount, empty when unset.
    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn gateway(&self) -> PaymentGateway {
        self.gateway
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }

    pub fn message(&self) -> Option<&FormMessage> {
        self.message.as_ref()
    }

    /// Displayed value of a field.
    pub fn value(&self, field: FormField) -> &str {
        self.values.get(field)
    }

    fn shows_amount_field(&self) -> bool {
        self.amount.is_empty()
    }

    /// External amount, else the amount field, else `"0"`.
    fn resolved_amount(&self) -> String {
        [self.amount.as_str(), self.values.amount.as_str()]
            .into_iter()
            .find(|a| !a.is_empty())
            .unwrap_or(FALLBACK_AMOUNT)
            .to_string()
    }

    fn payment_input(&self) -> PaymentInput {
        PaymentInput {
            amount: self.resolved_amount(),
            currency: self.currency,
            gateway: self.gateway,
            card_number: strip_whitespace(&self.values.card_number),
            expiry_date: self.values.expiry.clone(),
            cvv: self.values.cvv.clone(),
            card_holder: self.values.card_holder.clone(),
        }
    }
}

// =============================================================================
// Views
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct GatewayButtonView {
    pub id: PaymentGateway,
    pub name: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FieldView {
    pub id: String,
    pub label: String,
    pub placeholder: String,
    pub value: String,
    pub required: bool,
    pub max_length: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct SubmitView {
    pub label: String,
    pub disabled: bool,
}

/// Everything a host needs to draw the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FormView {
    /// `"<CUR> <amount>"`, present only when the host set an amount.
    pub amount_display: Option<String>,
    pub gateway_buttons: Vec<GatewayButtonView>,
    pub message: Option<FormMessage>,
    pub show_amount_field: bool,
    pub fields: Vec<FieldView>,
    pub submit: SubmitView,
}

impl From<&FormState> for FormView {
    fn from(state: &FormState) -> Self {
        let show_amount_field = state.shows_amount_field();
        let fields = show_amount_field
            .then_some(FormField::Amount)
            .into_iter()
            .chain(FormField::CARD_FIELDS)
            .map(|field| FieldView {
                id: field.id().to_string(),
                label: field.label().to_string(),
                placeholder: field.placeholder().to_string(),
                value: state.value(field).to_string(),
                required: field.required(),
                max_length: field.max_length().map(|n| n as u32),
            })
            .collect();

        FormView {
            amount_display: (!state.amount.is_empty())
                .then(|| format!("{} {}", state.currency, state.amount)),
            gateway_buttons: GATEWAY_CATALOG
                .iter()
                .map(|info| GatewayButtonView {
                    id: info.id,
                    name: info.name.to_string(),
                    active: info.id == state.gateway,
                })
                .collect(),
            message: state.message.clone(),
            show_amount_field,
            fields,
            submit: SubmitView {
                label: if state.processing {
                    PROCESSING_LABEL
                } else {
                    SUBMIT_LABEL
                }
                .to_string(),
                disabled: state.processing,
            },
        }
    }
}

// =============================================================================
// Submit Outcome
// =============================================================================

/// What a call to [`PaymentForm::submit`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A submission was already in flight. Nothing happened.
    Ignored,
    /// Settlement produced an outcome and the matching event was dispatched.
    Settled(SettlementOutcome),
    /// Settlement failed unexpectedly. The generic message is shown.
    Aborted(SettlementError),
}

/// Clears the processing flag when dropped, unless the submission completed.
struct ProcessingGuard {
    state: Option<Arc<Mutex<FormState>>>,
}

impl ProcessingGuard {
    /// Leaves processing and shows `message` in one critical section.
    fn complete(mut self, message: FormMessage) {
        if let Some(state) = self.state.take() {
            let mut state = state.lock().unwrap_or_else(PoisonError::into_inner);
            state.processing = false;
            state.message = Some(message);
        }
    }
}

impl Drop for ProcessingGuard {
    fn drop(&mut self) {
        if let Some(state) = self.state.take() {
            state.lock().unwrap_or_else(PoisonError::into_inner).processing = false;
            warn!("Submission cancelled before settlement finished");
        }
    }
}

// =============================================================================
// Payment Form
// =============================================================================

/// The payment form widget. Clones share the same instance.
#[derive(Clone)]
pub struct PaymentForm {
    state: Arc<Mutex<FormState>>,
    settlement: Arc<dyn Settlement>,
    sink: Arc<dyn EventSink>,
    node: NodeId,
}

impl PaymentForm {
    /// Creates a form with default configuration (no amount, USD, stripe).
    pub fn new(settlement: Arc<dyn Settlement>, sink: Arc<dyn EventSink>, node: NodeId) -> Self {
        Self::with_defaults(&FormDefaults::default(), settlement, sink, node)
    }

    /// Creates a form from the `[form]` config section.
    pub fn with_defaults(
        defaults: &FormDefaults,
        settlement: Arc<dyn Settlement>,
        sink: Arc<dyn EventSink>,
        node: NodeId,
    ) -> Self {
        PaymentForm {
            state: Arc::new(Mutex::new(FormState::from_defaults(defaults))),
            settlement,
            sink,
            node,
        }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Executes a function with read access to the form state.
    pub fn with_state<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&FormState) -> R,
    {
        f(&self.lock())
    }

    fn with_state_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut FormState) -> R,
    {
        f(&mut self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // =========================================================================
    // External Configuration
    // =========================================================================

    pub fn set_amount(&self, amount: impl Into<String>) {
        let amount = amount.into();
        self.with_state_mut(|s| s.amount = amount);
    }

    pub fn set_currency(&self, currency: Currency) {
        self.with_state_mut(|s| s.currency = currency);
    }

    /// Sets the active gateway without notifying anyone.
    pub fn set_gateway(&self, gateway: PaymentGateway) {
        self.with_state_mut(|s| s.gateway = gateway);
    }

    /// Applies a string attribute (`amount`, `currency`, `gateway`).
    ///
    /// Unknown attribute names and values outside the closed sets are
    /// rejected and leave the form unchanged.
    pub fn set_attribute(&self, name: &str, value: &str) -> WidgetResult<()> {
        match name.trim().to_ascii_lowercase().as_str() {
            "amount" => self.set_amount(value),
            "currency" => self.set_currency(value.parse()?),
            "gateway" => self.set_gateway(value.parse()?),
            other => return Err(CoreError::UnknownAttribute(other.to_string()).into()),
        }
        Ok(())
    }

    // =========================================================================
    // User Interaction
    // =========================================================================

    /// Gateway toggle click. Dispatches `gateway-change`.
    pub fn select_gateway(&self, gateway: PaymentGateway) {
        self.set_gateway(gateway);
        debug!(%gateway, node = %self.node, "Form gateway changed");

        self.sink
            .dispatch(self.node, WidgetEvent::GatewayChange(GatewayDetail { gateway }));
    }

    /// Typing into a field. Returns the displayed value after formatting.
    pub fn input(&self, field: FormField, raw: &str) -> String {
        let formatted = field.format(raw);
        self.with_state_mut(|s| *s.values.get_mut(field) = formatted.clone());
        formatted
    }

    /// Submits the form.
    ///
    /// ## Returns
    /// - `Ok(SubmitOutcome::Ignored)` while another submission is in flight
    /// - `Err(WidgetError::Validation)` when a required field is empty
    /// - `Ok(Settled | Aborted)` otherwise
    pub async fn submit(&self) -> WidgetResult<SubmitOutcome> {
        let submission = Uuid::new_v4();

        let input = {
            let mut state = self.lock();

            // Disabled submit control
            if state.processing {
                debug!(%submission, "Submit ignored, payment already processing");
                return Ok(SubmitOutcome::Ignored);
            }

            first_missing(
                FormField::CARD_FIELDS
                    .iter()
                    .map(|&f| (f.id(), state.values.get(f))),
            )?;

            state.processing = true;
            state.message = None;
            state.payment_input()
        };

        let guard = ProcessingGuard {
            state: Some(Arc::clone(&self.state)),
        };

        info!(
            %submission,
            gateway = %input.gateway,
            currency = %input.currency,
            amount = %input.amount,
            "Processing payment"
        );
        debug!(%submission, ?input, "Payment input");

        let result = self.settlement.settle(&input).await;

        match result {
            Ok(outcome) => {
                let (message, event) = match &outcome {
                    SettlementOutcome::Success {
                        transaction_id,
                        input,
                    } => {
                        info!(%submission, %transaction_id, "Payment succeeded");
                        (
                            FormMessage::success(transaction_id),
                            WidgetEvent::PaymentSuccess(PaymentSuccessDetail {
                                transaction_id: transaction_id.clone(),
                                gateway: input.gateway,
                                amount: input.amount.clone(),
                                currency: input.currency,
                                card_holder: input.card_holder.clone(),
                            }),
                        )
                    }
                    SettlementOutcome::Failure {
                        error_message,
                        error_code,
                    } => {
                        info!(%submission, code = %error_code, "Payment declined");
                        (
                            FormMessage::declined(),
                            WidgetEvent::PaymentError(PaymentErrorDetail {
                                error: error_message.clone(),
                                code: error_code.clone(),
                            }),
                        )
                    }
                };

                guard.complete(message);
                self.sink.dispatch(self.node, event);
                Ok(SubmitOutcome::Settled(outcome))
            }
            Err(e) => {
                error!(%submission, error = %e, "Settlement failed unexpectedly");
                guard.complete(FormMessage::unexpected());
                Ok(SubmitOutcome::Aborted(e))
            }
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn is_processing(&self) -> bool {
        self.with_state(FormState::is_processing)
    }

    pub fn message(&self) -> Option<FormMessage> {
        self.with_state(|s| s.message.clone())
    }

    pub fn gateway(&self) -> PaymentGateway {
        self.with_state(FormState::gateway)
    }

    /// Produces the view of the current state.
    pub fn render(&self) -> FormView {
        self.with_state(|s| FormView::from(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WidgetError;
    use crate::settlement::SimulatedSettlement;
    use crate::tree::{EventTree, NoOpSink};
    use async_trait::async_trait;
    use std::time::Duration;

    struct Broken;

    #[async_trait]
    impl Settlement for Broken {
        async fn settle(&self, _: &PaymentInput) -> Result<SettlementOutcome, SettlementError> {
            Err(SettlementError::Unavailable("offline".into()))
        }
    }

    fn form_with(settlement: impl Settlement + 'static) -> (Arc<EventTree>, PaymentForm) {
        let tree = Arc::new(EventTree::new());
        let node = tree.append_element(tree.root(), "payment-form").unwrap();
        let form = PaymentForm::new(Arc::new(settlement), tree.clone(), node);
        (tree, form)
    }

    fn fill(form: &PaymentForm) {
        form.input(FormField::CardHolder, "John Doe");
        form.input(FormField::CardNumber, "4242424242424242");
        form.input(FormField::Expiry, "1225");
        form.input(FormField::Cvv, "123");
    }

    #[test]
    fn test_input_formatting() {
        let form = PaymentForm::new(
            Arc::new(SimulatedSettlement::always_approve(Duration::ZERO)),
            Arc::new(NoOpSink),
            EventTree::new().root(),
        );

        assert_eq!(form.input(FormField::CardNumber, "4242 4242-4242x42"), "4242 4242 4242 42");
        assert_eq!(form.input(FormField::Expiry, "1"), "1");
        assert_eq!(form.input(FormField::Expiry, "12/345"), "12/34");
        assert_eq!(form.input(FormField::Cvv, "12345"), "1234");
        assert_eq!(form.input(FormField::CardHolder, " Jane "), " Jane ");
        assert_eq!(form.with_state(|s| s.value(FormField::Cvv).to_string()), "1234");
    }

    #[test]
    fn test_render_defaults() {
        let (_tree, form) = form_with(SimulatedSettlement::always_approve(Duration::ZERO));
        let view = form.render();

        assert_eq!(view.amount_display, None);
        assert!(view.show_amount_field);
        assert_eq!(view.fields[0].id, "amount");
        assert!(!view.fields[0].required);
        assert_eq!(view.fields.len(), 5);
        assert_eq!(view.fields[4].max_length, Some(4));
        assert_eq!(view.submit.label, "Process Payment");
        assert!(!view.submit.disabled);
        assert!(view.gateway_buttons[0].active);
        assert!(view.message.is_none());
    }

    #[test]
    fn test_attributes() {
        let (_tree, form) = form_with(SimulatedSettlement::always_approve(Duration::ZERO));

        form.set_attribute("amount", "50.00").unwrap();
        form.set_attribute("currency", "eur").unwrap();
        form.set_attribute("gateway", "PayPal").unwrap();

        let view = form.render();
        assert_eq!(view.amount_display.as_deref(), Some("EUR 50.00"));
        assert!(!view.show_amount_field);
        assert_eq!(view.fields.len(), 4);
        assert!(view.gateway_buttons[1].active);

        assert!(matches!(
            form.set_attribute("currency", "CHF"),
            Err(WidgetError::Core(CoreError::UnknownCurrency(_)))
        ));
        assert!(matches!(
            form.set_attribute("color", "red"),
            Err(WidgetError::Core(CoreError::UnknownAttribute(_)))
        ));
        assert_eq!(form.with_state(FormState::currency), Currency::EUR);
    }

    #[test]
    fn test_select_gateway_is_local() {
        let (tree, form) = form_with(SimulatedSettlement::always_approve(Duration::ZERO));
        let mut on_form = tree.listen(form.node()).unwrap();
        let mut on_root = tree.listen(tree.root()).unwrap();

        form.select_gateway(PaymentGateway::Paypal);

        assert_eq!(form.gateway(), PaymentGateway::Paypal);
        let events = on_form.drain();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event.name(), "gateway-change");
        assert!(on_root.try_recv().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_required_fields_block_submit() {
        let (tree, form) = form_with(SimulatedSettlement::always_approve(Duration::ZERO));
        let mut on_form = tree.listen(form.node()).unwrap();
        form.input(FormField::CardHolder, "John Doe");

        let err = form.submit().await.unwrap_err();

        assert_eq!(err.missing_field(), Some("cardNumber"));
        assert!(!form.is_processing());
        assert!(form.message().is_none());
        assert!(on_form.try_recv().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_successful_submit() {
        let (tree, form) = form_with(SimulatedSettlement::always_approve(Duration::from_millis(2000)));
        let mut on_form = tree.listen(form.node()).unwrap();
        form.set_amount("50.00");
        fill(&form);

        let outcome = form.submit().await.unwrap();

        let SubmitOutcome::Settled(SettlementOutcome::Success {
            transaction_id,
            input,
        }) = outcome
        else {
            panic!("expected success");
        };
        assert_eq!(input.card_number, "4242424242424242");
        assert_eq!(input.amount, "50.00");
        assert!(!form.is_processing());
        assert_eq!(
            form.message().unwrap().text,
            format!("Payment successful! Transaction ID: {transaction_id}")
        );

        let events = on_form.drain();
        assert_eq!(events.len(), 1);
        match &events[0].event {
            WidgetEvent::PaymentSuccess(detail) => {
                assert_eq!(detail.transaction_id, transaction_id);
                assert_eq!(detail.card_holder, "John Doe");
                assert_eq!(detail.currency, Currency::USD);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_declined_submit() {
        let (tree, form) = form_with(SimulatedSettlement::always_decline(Duration::from_millis(2000)));
        let mut on_form = tree.listen(form.node()).unwrap();
        fill(&form);

        let outcome = form.submit().await.unwrap();

        assert_eq!(outcome, SubmitOutcome::Settled(SettlementOutcome::declined()));
        assert_eq!(form.message(), Some(FormMessage::declined()));
        let events = on_form.drain();
        assert_eq!(events.len(), 1);
        assert_eq!(
            events[0].event.to_json().unwrap(),
            r#"{"type":"payment-error","detail":{"error":"Payment declined","code":"PAYMENT_DECLINED"}}"#
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_settlement_error_shows_generic_message() {
        let (tree, form) = form_with(Broken);
        let mut on_form = tree.listen(form.node()).unwrap();
        fill(&form);

        let outcome = form.submit().await.unwrap();

        assert!(matches!(outcome, SubmitOutcome::Aborted(SettlementError::Unavailable(_))));
        assert_eq!(form.message().unwrap().text, "An error occurred. Please try again.");
        assert!(!form.is_processing());
        assert!(on_form.try_recv().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_amount_fallbacks() {
        let (_tree, form) = form_with(SimulatedSettlement::always_approve(Duration::ZERO));
        fill(&form);

        let amount_of = |outcome: SubmitOutcome| match outcome {
            SubmitOutcome::Settled(SettlementOutcome::Success { input, .. }) => input.amount,
            other => panic!("unexpected {other:?}"),
        };

        assert_eq!(amount_of(form.submit().await.unwrap()), "0");

        form.input(FormField::Amount, "19.99");
        assert_eq!(amount_of(form.submit().await.unwrap()), "19.99");

        form.set_amount("50.00");
        assert_eq!(amount_of(form.submit().await.unwrap()), "50.00");
    }

    #[tokio::test(start_paused = true)]
    async fn test_processing_state_and_double_submit() {
        let (tree, form) = form_with(SimulatedSettlement::always_approve(Duration::from_millis(2000)));
        let mut on_form = tree.listen(form.node()).unwrap();
        fill(&form);

        let first = tokio::spawn({
            let form = form.clone();
            async move { form.submit().await }
        });
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert!(form.is_processing());
        let view = form.render();
        assert!(view.submit.disabled);
        assert_eq!(view.submit.label, "Processing...");
        assert!(view.message.is_none());

        assert_eq!(form.submit().await.unwrap(), SubmitOutcome::Ignored);

        let outcome = first.await.unwrap().unwrap();
        assert!(matches!(outcome, SubmitOutcome::Settled(_)));
        assert!(!form.is_processing());
        assert_eq!(on_form.drain().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_processing_check_runs_before_required_fields() {
        let (_tree, form) = form_with(SimulatedSettlement::always_approve(Duration::from_millis(2000)));
        fill(&form);

        let first = tokio::spawn({
            let form = form.clone();
            async move { form.submit().await }
        });
        tokio::time::sleep(Duration::from_millis(100)).await;

        // Fields stay editable while processing; an emptied one is not reported
        form.input(FormField::CardHolder, "");
        assert_eq!(form.submit().await.unwrap(), SubmitOutcome::Ignored);

        first.await.unwrap().unwrap();
        let err = form.submit().await.unwrap_err();
        assert_eq!(err.missing_field(), Some("cardHolder"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_submit_leaves_processing() {
        let (_tree, form) = form_with(SimulatedSettlement::always_approve(Duration::from_millis(2000)));
        fill(&form);

        let cancelled =
            tokio::time::timeout(Duration::from_millis(500), form.submit()).await;

        assert!(cancelled.is_err());
        assert!(!form.is_processing());
        assert!(form.message().is_none());
    }
}
