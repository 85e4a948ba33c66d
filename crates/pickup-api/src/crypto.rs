//! Shopify webhook signature verification.
//!
//! Shopify signs each delivery with a base64-encoded HMAC-SHA256 of the raw
//! request body, keyed by the app's webhook secret, and sends it in the
//! `X-Shopify-Hmac-Sha256` header. Verification must run on the exact bytes
//! received; re-serializing a parsed payload does not reproduce the digest.
//!
//! # Unsigned requests
//!
//! A request without the header is reported as [`SignatureCheck::NotPresent`]
//! and is still processed. This allows manual and test invocations, but it
//! also means anyone who can reach the endpoint can submit an unsigned order.
//! Deployments exposed to the internet should reject `NotPresent` at the edge
//! or change the handler's policy.

use std::fmt;

use axum::http::HeaderMap;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the webhook signature.
pub const SIGNATURE_HEADER: &str = "X-Shopify-Hmac-Sha256";

/// Outcome of checking a request's signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureCheck {
    /// No signature header was sent; verification was not applicable.
    NotPresent,
    /// The signature matches the body.
    Valid,
    /// A signature was sent and does not match the body.
    Invalid,
}

impl SignatureCheck {
    /// Whether the request must be refused.
    pub const fn is_rejected(self) -> bool {
        matches!(self, Self::Invalid)
    }
}

/// Signature computation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignatureError {
    /// Invalid secret key.
    InvalidSecret,
}

impl fmt::Display for SignatureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSecret => write!(f, "invalid secret key"),
        }
    }
}

impl std::error::Error for SignatureError {}

/// Checks the signature header of a webhook request against its raw body.
///
/// An empty header counts as absent. A header that is not valid visible
/// ASCII, not valid base64, or that does not match is `Invalid`. With an empty
/// `secret` nothing can be verified, so any supplied signature is `Invalid`.
pub fn verify_webhook(headers: &HeaderMap, body: &[u8], secret: &str) -> SignatureCheck {
    let Some(value) = headers.get(SIGNATURE_HEADER) else {
        return SignatureCheck::NotPresent;
    };

    if value.is_empty() {
        return SignatureCheck::NotPresent;
    }

    match value.to_str() {
        Ok(signature) if verify_signature(body, signature, secret) => SignatureCheck::Valid,
        _ => SignatureCheck::Invalid,
    }
}

/// Verifies a base64 HMAC-SHA256 signature of `payload`.
///
/// The digest comparison is constant-time.
pub fn verify_signature(payload: &[u8], signature: &str, secret: &str) -> bool {
    if secret.is_empty() {
        return false;
    }

    let Ok(expected) = STANDARD.decode(signature.trim()) else {
        return false;
    };

    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(payload);
    mac.verify_slice(&expected).is_ok()
}

/// Computes the base64 HMAC-SHA256 signature Shopify would send for
/// `payload`.
///
/// # Errors
///
/// Returns `SignatureError::InvalidSecret` if the key is rejected by the MAC.
pub fn compute_signature_base64(payload: &[u8], secret: &str) -> Result<String, SignatureError> {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).map_err(|_| SignatureError::InvalidSecret)?;

    mac.update(payload);
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}
