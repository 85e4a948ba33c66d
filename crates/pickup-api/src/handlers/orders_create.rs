//! Shopify `orders/create` webhook handler.
//!
//! Verifies the signature on the raw body, parses the order, and for pickup
//! orders with a known boutique pushes the boutique address back to Shopify.
//! Each step either continues or ends the delivery with a fixed plaintext
//! response; see [`Disposition`] and [`error_response`].

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use pickup_core::{classify, rewrite_order, Classification, Order, PickupError, Result};
use tracing::{debug, error, info, instrument, warn};

use crate::{
    crypto::{verify_webhook, SignatureCheck, SIGNATURE_HEADER},
    AppState,
};

/// How a delivery that did not fail was handled. Always answered with 200.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// The order was rewritten to its boutique.
    Updated,
    /// The first shipping line is not an in-store pickup.
    NotPickup,
    /// Pickup order without a boutique selection note.
    NoStoreSelected,
    /// Pickup order naming a boutique missing from the directory.
    UnknownStore,
}

impl Disposition {
    /// Response body sent back to Shopify.
    pub const fn message(self) -> &'static str {
        match self {
            Self::Updated => "OK",
            Self::NotPickup => "Not pickup order",
            Self::NoStoreSelected => "No boutique selected",
            Self::UnknownStore => "Unknown boutique",
        }
    }
}

impl IntoResponse for Disposition {
    fn into_response(self) -> Response {
        (StatusCode::OK, self.message()).into_response()
    }
}

/// Handles an `orders/create` webhook delivery.
///
/// # Errors
///
/// Failures are turned into responses rather than propagated:
/// - 401: a signature header was sent and does not match the body
/// - 500 "Shopify update failed": Shopify rejected the update
/// - 500 "Error": malformed payload or any other failure
#[instrument(
    name = "orders_create",
    skip(state, headers, body),
    fields(
        payload_size = body.len(),
        signed = headers.contains_key(SIGNATURE_HEADER),
        webhook_id = headers.get("x-shopify-webhook-id").and_then(|v| v.to_str().ok()).unwrap_or("none"),
    )
)]
pub async fn orders_create(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    info!("Webhook received");

    match process_order_webhook(&state, &headers, &body).await {
        Ok(disposition) => disposition.into_response(),
        Err(e) => error_response(&e),
    }
}

/// Runs the verification, classification, and update pipeline for one
/// delivery.
///
/// # Errors
///
/// Returns `InvalidSignature` before touching the body if a supplied
/// signature does not match, `MalformedPayload` if the body is not an order,
/// `MissingOrderId` if a resolvable pickup order has no id, and the mapped
/// client error if the Shopify update fails.
pub async fn process_order_webhook(
    state: &AppState,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<Disposition> {
    match verify_webhook(headers, body, &state.webhook_secret) {
        SignatureCheck::Invalid if state.webhook_secret.is_empty() => {
            warn!(reason = "webhook secret not configured", "Invalid signature");
            return Err(PickupError::InvalidSignature);
        },
        SignatureCheck::Invalid => {
            warn!(reason = "signature mismatch", "Invalid signature");
            return Err(PickupError::InvalidSignature);
        },
        SignatureCheck::NotPresent => debug!("No signature header, verification skipped"),
        SignatureCheck::Valid => debug!("Signature verified"),
    }

    let order = Order::from_slice(body)?;
    info!(order_id = ?order.id.map(|id| id.0), "Order parsed");

    let store = match classify(&order, &state.stores) {
        Classification::NotPickup => {
            info!("Not a pickup order");
            return Ok(Disposition::NotPickup);
        },
        Classification::NoStoreSelected => {
            info!("No boutique selected");
            return Ok(Disposition::NoStoreSelected);
        },
        Classification::UnknownStore(key) => {
            info!(boutique = ?key, "Unknown boutique");
            return Ok(Disposition::UnknownStore);
        },
        Classification::Pickup(store) => store,
    };

    info!(boutique = %store.name, "Boutique found");

    let update = rewrite_order(&order, store)?;

    info!(order_id = %update.id, "Updating order on Shopify");
    state.shopify.update_order(&update).await?;

    info!(order_id = %update.id, "Order updated successfully");
    Ok(Disposition::Updated)
}

/// Maps a processing failure to the plaintext response sent to Shopify.
///
/// Upstream response bodies are logged here and never echoed back.
pub fn error_response(err: &PickupError) -> Response {
    let (status, message) = match err {
        PickupError::InvalidSignature => (StatusCode::UNAUTHORIZED, "Invalid webhook signature"),
        PickupError::UpdateRejected { status, body } => {
            error!(code = err.code(), upstream_status = status, body = %body, "Shopify update error");
            (StatusCode::INTERNAL_SERVER_ERROR, "Shopify update failed")
        },
        _ => {
            error!(code = err.code(), error = %err, "Webhook processing failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Error")
        },
    };

    (status, message).into_response()
}
