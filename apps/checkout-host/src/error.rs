//! # Host Error Type
//!
//! Error type the host hands to whatever draws the widgets.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Checkout Host                      │
//! │                                                                         │
//! │  widget call ──► WidgetError / CoreError ──► HostError ──► JSON         │
//! │                                                                         │
//! │  { "code": "MISSING_FIELD", "message": "Submit blocked: cvv is ..." }   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use checkout_core::CoreError;
use checkout_ui::WidgetError;
use serde::Serialize;
use thiserror::Error;

/// Result type alias for host operations.
pub type HostResult<T> = Result<T, HostError>;

/// Error returned from host operations.
///
/// ## Serialization
/// ```json
/// {
///   "code": "UNKNOWN_VALUE",
///   "message": "Unknown payment gateway: 'square'"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct HostError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for host responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Config file unreadable or invalid
    ConfigError,

    /// Gateway, currency or attribute outside the supported set
    UnknownValue,

    /// A required form field is empty
    MissingField,

    /// Anything else
    Internal,
}

impl HostError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        HostError {
            code,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        HostError::new(ErrorCode::Internal, message)
    }

    /// Serializes the error for a frontend.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| self.message.clone())
    }
}

impl From<CoreError> for HostError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::UnknownGateway(_)
            | CoreError::UnknownCurrency(_)
            | CoreError::UnknownAttribute(_) => {
                HostError::new(ErrorCode::UnknownValue, err.to_string())
            }
            CoreError::Validation(_) => HostError::new(ErrorCode::MissingField, err.to_string()),
        }
    }
}

impl From<WidgetError> for HostError {
    fn from(err: WidgetError) -> Self {
        if err.is_config_error() {
            return HostError::new(ErrorCode::ConfigError, err.to_string());
        }

        match err {
            WidgetError::Core(core) => core.into(),
            WidgetError::Validation(_) => HostError::new(ErrorCode::MissingField, err.to_string()),
            other => {
                tracing::error!("Unexpected widget error: {}", other);
                HostError::internal(other.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkout_core::ValidationError;

    #[test]
    fn test_widget_error_mapping() {
        let err: HostError = WidgetError::from(ValidationError::Required {
            field: "cvv".into(),
        })
        .into();
        assert_eq!(err.code, ErrorCode::MissingField);
        assert_eq!(
            err.to_json(),
            r#"{"code":"MISSING_FIELD","message":"Submit blocked: cvv is required"}"#
        );

        let err: HostError = WidgetError::Core(CoreError::UnknownGateway("square".into())).into();
        assert_eq!(err.code, ErrorCode::UnknownValue);

        let err: HostError = WidgetError::InvalidConfig("bad".into()).into();
        assert_eq!(err.code, ErrorCode::ConfigError);

        let err: HostError = WidgetError::UnknownNode(9).into();
        assert_eq!(err.code, ErrorCode::Internal);
    }
}
