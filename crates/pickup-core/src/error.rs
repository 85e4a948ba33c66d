//! Error taxonomy for webhook processing.
//!
//! Expected classifications (not a pickup order, no boutique selected,
//! unknown boutique) are not errors and never appear here. Every variant
//! below ends the webhook delivery with a non-2xx response so the sender's
//! own retry mechanism can take over.

use thiserror::Error;

/// Result type alias using `PickupError`.
pub type Result<T> = std::result::Result<T, PickupError>;

/// Failures that abort processing of a single webhook delivery.
#[derive(Debug, Error)]
pub enum PickupError {
    /// A signature header was supplied and did not match the body (E1001).
    #[error("[E1001] Invalid signature: HMAC validation failed")]
    InvalidSignature,

    /// Body is not a JSON order object (E1002).
    #[error("[E1002] Malformed payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    /// Pickup order resolved to a boutique but carries no id to update (E1003).
    #[error("[E1003] Missing order id: cannot address the update request")]
    MissingOrderId,

    /// Shopify answered the update with a non-success status (E2001).
    #[error("[E2001] Update rejected: HTTP {status} from Shopify")]
    UpdateRejected {
        /// HTTP status code returned by Shopify
        status: u16,
        /// Response body, kept for diagnostics only
        body: String,
    },

    /// The update request never produced a response (E2002).
    #[error("[E2002] Update unavailable: {message}")]
    UpdateUnavailable {
        /// Transport-level failure description
        message: String,
    },

    /// Generic error for wrapping other errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PickupError {
    /// Returns the error code.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidSignature => "E1001",
            Self::MalformedPayload(_) => "E1002",
            Self::MissingOrderId => "E1003",
            Self::UpdateRejected { .. } => "E2001",
            Self::UpdateUnavailable { .. } => "E2002",
            Self::Other(_) => "E9999",
        }
    }
}
