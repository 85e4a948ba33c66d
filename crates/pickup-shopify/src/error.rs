//! Error types for order update requests.
//!
//! There is no retry layer: every variant is terminal for the webhook
//! delivery that triggered the update.

use pickup_core::PickupError;
use thiserror::Error;

/// Result type alias for update operations.
pub type Result<T> = std::result::Result<T, UpdateError>;

/// Failures of a single order update request.
#[derive(Debug, Clone, Error)]
pub enum UpdateError {
    /// Connection to Shopify could not be established or was dropped.
    #[error("network connection failed: {message}")]
    NetworkError {
        /// Error message describing the network failure
        message: String,
    },

    /// Request did not complete within the configured timeout.
    #[error("request timeout after {timeout_seconds}s")]
    Timeout {
        /// Number of seconds before the request timed out
        timeout_seconds: u64,
    },

    /// Shopify answered with a non-2xx status.
    #[error("update rejected: HTTP {status_code}")]
    Rejected {
        /// HTTP status code
        status_code: u16,
        /// Response body content
        body: String,
    },

    /// The HTTP client could not be built from the configuration.
    #[error("invalid client configuration: {message}")]
    ConfigurationError {
        /// Configuration error message
        message: String,
    },
}

impl UpdateError {
    /// Creates a network error from a message.
    pub fn network(message: impl Into<String>) -> Self {
        Self::NetworkError { message: message.into() }
    }

    /// Creates a timeout error.
    pub fn timeout(timeout_seconds: u64) -> Self {
        Self::Timeout { timeout_seconds }
    }

    /// Creates a rejection error from an HTTP response.
    pub fn rejected(status_code: u16, body: impl Into<String>) -> Self {
        Self::Rejected { status_code, body: body.into() }
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError { message: message.into() }
    }
}

impl From<UpdateError> for PickupError {
    fn from(err: UpdateError) -> Self {
        match err {
            UpdateError::Rejected { status_code, body } => {
                Self::UpdateRejected { status: status_code, body }
            },
            UpdateError::NetworkError { .. } | UpdateError::Timeout { .. } => {
                Self::UpdateUnavailable { message: err.to_string() }
            },
            UpdateError::ConfigurationError { .. } => Self::Other(err.into()),
        }
    }
}
