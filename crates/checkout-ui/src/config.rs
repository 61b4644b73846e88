//! # Widget Configuration
//!
//! Configuration management for the checkout widgets.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     CHECKOUT_LATENCY_MS=500                                            │
//! │     CHECKOUT_GATEWAY=paypal                                            │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/checkout-widgets/checkout.toml (Linux)                   │
//! │     ~/Library/Application Support/com.checkout.widgets/... (macOS)     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     2000 ms latency, 70% approval, USD, stripe                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # checkout.toml
//! [settlement]
//! latency_ms = 2000
//! success_rate = 0.7
//!
//! [form]
//! amount = "50.00"
//! currency = "USD"
//! gateway = "stripe"
//! ```

use checkout_core::validation::validate_probability;
use checkout_core::{Currency, PaymentGateway};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::{WidgetError, WidgetResult};

/// File name of the config file inside the platform config dir.
pub const CONFIG_FILE_NAME: &str = "checkout.toml";

// =============================================================================
// Settlement Settings
// =============================================================================

/// Simulated settlement behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementSettings {
    /// Delay before an outcome is produced (milliseconds).
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,

    /// Probability that a payment is approved.
    #[serde(default = "default_success_rate")]
    pub success_rate: f64,
}

fn default_latency_ms() -> u64 {
    2000
}

fn default_success_rate() -> f64 {
    0.7
}

impl Default for SettlementSettings {
    fn default() -> Self {
        SettlementSettings {
            latency_ms: default_latency_ms(),
            success_rate: default_success_rate(),
        }
    }
}

impl SettlementSettings {
    /// Returns the latency as a `Duration`.
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

// =============================================================================
// Form Defaults
// =============================================================================

/// Initial external configuration of a payment form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormDefaults {
    /// Amount shown in the header. Empty means "ask the user".
    #[serde(default)]
    pub amount: String,

    #[serde(default)]
    pub currency: Currency,

    #[serde(default)]
    pub gateway: PaymentGateway,
}

// =============================================================================
// Main Widget Configuration
// =============================================================================

/// Complete widget configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WidgetConfig {
    #[serde(default)]
    pub settlement: SettlementSettings,

    #[serde(default)]
    pub form: FormDefaults,
}

impl WidgetConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (checkout.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> WidgetResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading widget config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load widget config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> WidgetResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| WidgetError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| WidgetError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| WidgetError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Widget config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> WidgetResult<()> {
        validate_probability("settlement.success_rate", self.settlement.success_rate)
            .map_err(|e| WidgetError::InvalidConfig(e.to_string()))?;

        Ok(())
    }

    /// Applies `CHECKOUT_*` environment variable overrides.
    ///
    /// Unparseable values are ignored with a warning.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from an arbitrary lookup (environment in production).
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("CHECKOUT_LATENCY_MS") {
            match value.parse() {
                Ok(ms) => self.settlement.latency_ms = ms,
                Err(_) => warn!(%value, "Ignoring invalid CHECKOUT_LATENCY_MS"),
            }
        }

        if let Some(value) = lookup("CHECKOUT_SUCCESS_RATE") {
            match value.parse() {
                Ok(rate) => self.settlement.success_rate = rate,
                Err(_) => warn!(%value, "Ignoring invalid CHECKOUT_SUCCESS_RATE"),
            }
        }

        if let Some(value) = lookup("CHECKOUT_AMOUNT") {
            self.form.amount = value;
        }

        if let Some(value) = lookup("CHECKOUT_CURRENCY") {
            match value.parse() {
                Ok(currency) => self.form.currency = currency,
                Err(e) => warn!(error = %e, "Ignoring invalid CHECKOUT_CURRENCY"),
            }
        }

        if let Some(value) = lookup("CHECKOUT_GATEWAY") {
            match value.parse() {
                Ok(gateway) => self.form.gateway = gateway,
                Err(e) => warn!(error = %e, "Ignoring invalid CHECKOUT_GATEWAY"),
            }
        }
    }

    /// Returns the default config file path for the platform.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "checkout", "widgets")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}
