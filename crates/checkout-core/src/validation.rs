//! # Validation Module
//!
//! Input validation for the checkout widgets.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      What Gets Validated                                │
//! │                                                                         │
//! │  Form fields (native control semantics only)                           │
//! │  ├── required  → empty value blocks the submit                         │
//! │  └── maxlength → enforced while typing (see format::truncate_chars)    │
//! │                                                                         │
//! │  NOT validated (deliberate):                                           │
//! │  ├── card number length / Luhn checksum                                │
//! │  ├── expiry month range or date in the past                            │
//! │  └── CVV digits                                                        │
//! │                                                                         │
//! │  Widget configuration                                                  │
//! │  └── success probability within [0, 1]                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use checkout_core::validation::{validate_required, first_missing};
//!
//! assert!(validate_required("cardHolder", "John Doe").is_ok());
//! assert!(validate_required("cardHolder", "").is_err());
//!
//! let missing = first_missing([("cardHolder", "Jane"), ("cvv", "")]);
//! assert!(missing.is_err());
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a required field.
///
/// ## Rules
/// - Empty value fails (whitespace counts as a value, like a native
///   `required` control)
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Checks required fields in order and reports the first empty one.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Form: Process Payment                                                  │
/// │                                                                         │
/// │  User clicks submit                                                    │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  first_missing(required fields) ← THIS FUNCTION                        │
/// │       │                                                                 │
/// │       ├── some field empty? → submit blocked, field reported           │
/// │       │                                                                 │
/// │       └── OK → submit handler runs                                     │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn first_missing<'a, I>(fields: I) -> ValidationResult<()>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    fields
        .into_iter()
        .try_for_each(|(field, value)| validate_required(field, value))
}

// =============================================================================
// Configuration Validators
// =============================================================================

/// Validates a probability value.
///
/// ## Rules
/// - Must be a finite number between 0.0 and 1.0 inclusive
pub fn validate_probability(field: &str, value: f64) -> ValidationResult<()> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0.0,
            max: 1.0,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required() {
        assert!(validate_required("cvv", "123").is_ok());
        assert!(validate_required("cvv", " ").is_ok());
        assert_eq!(
            validate_required("cvv", ""),
            Err(ValidationError::Required {
                field: "cvv".to_string()
            })
        );
    }

    #[test]
    fn test_first_missing_reports_first_empty_field() {
        let result = first_missing([
            ("cardHolder", "John Doe"),
            ("cardNumber", ""),
            ("expiry", ""),
        ]);
        assert_eq!(
            result,
            Err(ValidationError::Required {
                field: "cardNumber".to_string()
            })
        );

        assert!(first_missing([("cardHolder", "John Doe")]).is_ok());
        assert!(first_missing(std::iter::empty::<(&str, &str)>()).is_ok());
    }

    #[test]
    fn test_validate_probability() {
        assert!(validate_probability("success_rate", 0.0).is_ok());
        assert!(validate_probability("success_rate", 0.7).is_ok());
        assert!(validate_probability("success_rate", 1.0).is_ok());
        assert!(validate_probability("success_rate", 1.01).is_err());
        assert!(validate_probability("success_rate", -0.1).is_err());
        assert!(validate_probability("success_rate", f64::NAN).is_err());
    }
}
