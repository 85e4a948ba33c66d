//! HTTP request handlers for the pickup router.
//!
//! - `orders_create` - Shopify `orders/create` webhook
//! - `health` - Liveness probe
//!
//! Webhook responses are short plaintext bodies. Classification outcomes
//! that need no update (not a pickup order, no or unknown boutique) are
//! answered with 200 so Shopify does not retry a delivery that was handled.

pub mod health;
pub mod orders_create;

pub use health::health_check;
pub use orders_create::orders_create;
