//! # Settlement
//!
//! The step that turns a packaged [`PaymentInput`] into a
//! [`SettlementOutcome`].
//!
//! ## Simulated Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     SimulatedSettlement::settle                         │
//! │                                                                         │
//! │  PaymentInput ──► sleep(latency) ──► draw outcome                      │
//! │                    (2000 ms)          │                                 │
//! │                                       ├── p = success_rate             │
//! │                                       │   Success { txn_xxxxxxxxx }    │
//! │                                       │                                 │
//! │                                       └── 1 - p                        │
//! │                                           Failure { PAYMENT_DECLINED } │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No gateway is ever contacted. Real processors plug in behind the
//! [`Settlement`] trait.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use checkout_core::validation::validate_probability;
use checkout_core::{PaymentInput, SettlementOutcome};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::config::SettlementSettings;
use crate::error::{SettlementError, WidgetError, WidgetResult};

/// Prefix of every synthetic transaction id.
pub const TRANSACTION_ID_PREFIX: &str = "txn_";

/// Number of random characters after the prefix.
pub const TRANSACTION_ID_LENGTH: usize = 9;

const BASE36_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

// =============================================================================
// Settlement Trait
// =============================================================================

/// Settles a payment.
///
/// A declined payment is a successful call returning
/// `SettlementOutcome::Failure`. `Err` is reserved for unexpected failures.
#[async_trait]
pub trait Settlement: Send + Sync {
    async fn settle(&self, input: &PaymentInput) -> Result<SettlementOutcome, SettlementError>;
}

// =============================================================================
// Simulated Settlement
// =============================================================================

/// Settlement that waits a fixed latency and approves at random.
pub struct SimulatedSettlement {
    latency: Duration,
    success_rate: f64,
    rng: Mutex<StdRng>,
}

impl SimulatedSettlement {
    /// Creates a simulator seeded from OS entropy.
    pub fn new(latency: Duration, success_rate: f64) -> WidgetResult<Self> {
        Self::with_rng(latency, success_rate, StdRng::from_entropy())
    }

    /// Creates a simulator with a deterministic outcome sequence.
    pub fn with_seed(latency: Duration, success_rate: f64, seed: u64) -> WidgetResult<Self> {
        Self::with_rng(latency, success_rate, StdRng::seed_from_u64(seed))
    }

    /// Creates a simulator from the `[settlement]` config section.
    pub fn from_config(settings: &SettlementSettings) -> WidgetResult<Self> {
        Self::new(settings.latency(), settings.success_rate)
    }

    /// Approves every payment.
    pub fn always_approve(latency: Duration) -> Self {
        Self::unchecked(latency, 1.0)
    }

    /// Declines every payment.
    pub fn always_decline(latency: Duration) -> Self {
        Self::unchecked(latency, 0.0)
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    pub fn success_rate(&self) -> f64 {
        self.success_rate
    }

    fn with_rng(latency: Duration, success_rate: f64, rng: StdRng) -> WidgetResult<Self> {
        validate_probability("success_rate", success_rate)
            .map_err(|e| WidgetError::InvalidConfig(e.to_string()))?;

        Ok(SimulatedSettlement {
            latency,
            success_rate,
            rng: Mutex::new(rng),
        })
    }

    fn unchecked(latency: Duration, success_rate: f64) -> Self {
        SimulatedSettlement {
            latency,
            success_rate,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }
}

#[async_trait]
impl Settlement for SimulatedSettlement {
    async fn settle(&self, input: &PaymentInput) -> Result<SettlementOutcome, SettlementError> {
        debug!(latency_ms = self.latency.as_millis() as u64, gateway = %input.gateway, "Settling payment");
        tokio::time::sleep(self.latency).await;

        let mut rng = self
            .rng
            .lock()
            .map_err(|_| SettlementError::Internal("outcome generator poisoned".into()))?;

        if rng.gen_bool(self.success_rate) {
            Ok(SettlementOutcome::Success {
                transaction_id: generate_transaction_id(&mut *rng),
                input: input.clone(),
            })
        } else {
            Ok(SettlementOutcome::declined())
        }
    }
}

/// Generates `txn_` followed by 9 lowercase base-36 characters.
pub fn generate_transaction_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    let suffix: String = (0..TRANSACTION_ID_LENGTH)
        .map(|_| BASE36_ALPHABET[rng.gen_range(0..BASE36_ALPHABET.len())] as char)
        .collect();
    format!("{TRANSACTION_ID_PREFIX}{suffix}")
}
