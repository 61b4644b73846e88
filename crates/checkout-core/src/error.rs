//! # Error Types
//!
//! Domain-specific error types for checkout-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  checkout-core errors (this file)                                      │
//! │  ├── CoreError        - Unknown identifiers, attribute parsing         │
//! │  └── ValidationError  - Required-field failures                        │
//! │                                                                         │
//! │  checkout-ui errors (separate crate)                                   │
//! │  ├── WidgetError      - Configuration, attribute, submit blocking      │
//! │  └── SettlementError  - Unexpected failure of the settlement step      │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → WidgetError → Host                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A declined payment is NOT an error at this level: it is a regular
//! settlement outcome and travels as a `payment-error` notification.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    /// Identifier does not name a catalog gateway.
    ///
    /// ## When This Occurs
    /// - Host sets the `gateway` attribute to something other than
    ///   `stripe` or `paypal`
    #[error("Unknown payment gateway: '{0}'")]
    UnknownGateway(String),

    /// Code is not one of the supported currencies.
    #[error("Unknown currency: '{0}'")]
    UnknownCurrency(String),

    /// Attribute name is not part of the form's configuration surface.
    #[error("Unknown attribute: '{0}'")]
    UnknownAttribute(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Mirrors what native form controls enforce: the `required` attribute and
/// `maxlength`. Nothing else (Luhn, expiry range, CVV digits) is checked.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: f64, max: f64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::UnknownGateway("square".to_string());
        assert_eq!(err.to_string(), "Unknown payment gateway: 'square'");

        let err = CoreError::UnknownCurrency("CHF".to_string());
        assert_eq!(err.to_string(), "Unknown currency: 'CHF'");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "cardHolder".to_string(),
        };
        assert_eq!(err.to_string(), "cardHolder is required");

        let err = ValidationError::OutOfRange {
            field: "success_rate".to_string(),
            min: 0.0,
            max: 1.0,
        };
        assert_eq!(err.to_string(), "success_rate must be between 0 and 1");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "cvv".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
