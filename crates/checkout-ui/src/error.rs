//! # Widget Error Types
//!
//! Error types for the checkout widgets.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Widget Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │  Host Surface   │  │     Form Input          │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Core (unknown  │  │  Validation (required   │ │
//! │  │  ConfigLoad     │  │  gateway, ...)  │  │  field is empty)        │ │
//! │  │  ConfigSave     │  │  UnknownNode    │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  ┌───────────────────────────────────────────────────────────────────┐ │
//! │  │  SettlementError (separate type)                                  │ │
//! │  │  Unexpected failure of the settlement step. Never re-thrown: the  │ │
//! │  │  form turns it into a generic message.                            │ │
//! │  └───────────────────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use checkout_core::{CoreError, ValidationError};
use thiserror::Error;

/// Result type alias for widget operations.
pub type WidgetResult<T> = Result<T, WidgetError>;

/// Widget error type.
#[derive(Debug, Error)]
pub enum WidgetError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid widget configuration.
    #[error("Invalid widget configuration: {0}")]
    InvalidConfig(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Host Surface Errors
    // =========================================================================
    /// Host supplied a value outside the closed sets.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Node id does not belong to the event tree.
    #[error("Unknown event tree node: {0}")]
    UnknownNode(usize),

    // =========================================================================
    // Form Input Errors
    // =========================================================================
    /// Native-style field validation blocked the submit.
    #[error("Submit blocked: {0}")]
    Validation(#[from] ValidationError),
}

/// Unexpected failure while settling a payment.
///
/// A declined payment is not a `SettlementError`; it is a regular
/// [`SettlementOutcome::Failure`](checkout_core::SettlementOutcome).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SettlementError {
    /// The settlement backend could not be reached.
    #[error("Settlement unavailable: {0}")]
    Unavailable(String),

    /// Internal settlement failure.
    #[error("Internal settlement error: {0}")]
    Internal(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<std::io::Error> for WidgetError {
    fn from(err: std::io::Error) -> Self {
        WidgetError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for WidgetError {
    fn from(err: toml::de::Error) -> Self {
        WidgetError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for WidgetError {
    fn from(err: toml::ser::Error) -> Self {
        WidgetError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl WidgetError {
    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            WidgetError::InvalidConfig(_)
                | WidgetError::ConfigLoadFailed(_)
                | WidgetError::ConfigSaveFailed(_)
        )
    }

    /// Returns the field that blocked a submit, if any.
    pub fn missing_field(&self) -> Option<&str> {
        match self {
            WidgetError::Validation(ValidationError::Required { field }) => Some(field),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_errors() {
        assert!(WidgetError::InvalidConfig("bad".into()).is_config_error());
        assert!(WidgetError::ConfigLoadFailed("missing".into()).is_config_error());
        assert!(!WidgetError::UnknownNode(3).is_config_error());
    }

    #[test]
    fn test_missing_field() {
        let err: WidgetError = ValidationError::Required {
            field: "cvv".into(),
        }
        .into();
        assert_eq!(err.missing_field(), Some("cvv"));
        assert_eq!(err.to_string(), "Submit blocked: cvv is required");
    }

    #[test]
    fn test_core_errors_are_transparent() {
        let err: WidgetError = CoreError::UnknownCurrency("CHF".into()).into();
        assert_eq!(err.to_string(), "Unknown currency: 'CHF'");
    }
}
