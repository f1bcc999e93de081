//! # Checkout Error Types
//!
//! Typed error handling for the checkout-session engine.
//! All session operations return `Result<T, CheckoutError>`.

use thiserror::Error;

/// Core error type for all checkout-session operations
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Configuration errors (missing env vars, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Missing or malformed required input; no session state is touched
    #[error("Validation error: {0}")]
    Validation(String),

    /// Unknown session or order id
    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },

    /// Operation not permitted in the session's current status
    #[error("Invalid state: {message} (status: {status})")]
    InvalidState { status: String, message: String },

    /// Catalog config could not be parsed
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CheckoutError {
    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            CheckoutError::Configuration(_) => 500,
            CheckoutError::Validation(_) => 400,
            CheckoutError::NotFound { .. } => 404,
            CheckoutError::InvalidState { .. } => 400,
            CheckoutError::Catalog(_) => 500,
            CheckoutError::Internal(_) => 500,
        }
    }

    /// Convenience constructor for session lookups
    pub fn session_not_found(id: impl Into<String>) -> Self {
        CheckoutError::NotFound {
            resource: "Checkout session",
            id: id.into(),
        }
    }

    /// Convenience constructor for order lookups
    pub fn order_not_found(id: impl Into<String>) -> Self {
        CheckoutError::NotFound {
            resource: "Order",
            id: id.into(),
        }
    }
}

/// Result type alias for checkout operations
pub type CheckoutResult<T> = Result<T, CheckoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            CheckoutError::Validation("missing currency".into()).status_code(),
            400
        );
        assert_eq!(CheckoutError::session_not_found("cs_x").status_code(), 404);
        assert_eq!(
            CheckoutError::InvalidState {
                status: "completed".into(),
                message: "session is terminal".into()
            }
            .status_code(),
            400
        );
        assert_eq!(
            CheckoutError::Catalog("bad toml".into()).status_code(),
            500
        );
    }

    #[test]
    fn test_not_found_display() {
        let err = CheckoutError::session_not_found("cs_123");
        assert_eq!(err.to_string(), "Checkout session not found: cs_123");
    }
}
