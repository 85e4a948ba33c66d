//! Core domain for the pickup router.
//!
//! Holds the subset of the order payload the router consumes, the boutique
//! directory, and the pure classification and rewriting steps applied to an
//! `orders/create` webhook. Nothing in this crate performs I/O; the HTTP
//! surface and the Shopify client build on top of it.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod classify;
pub mod error;
pub mod models;
pub mod rewrite;
pub mod stores;

pub use classify::{classify, is_pickup, store_selection, Classification};
pub use error::{PickupError, Result};
pub use models::{NoteAttribute, Order, OrderId, OrderUpdate, ShippingAddress, ShippingLine};
pub use rewrite::{original_address_note, rewrite_notes, rewrite_order, store_address};
pub use stores::{StoreDirectory, StoreRecord};

/// Substring of a shipping line title that marks an in-store pickup.
pub const PICKUP_MARKER: &str = "retrait";

/// Note attribute naming the boutique chosen by the customer.
pub const STORE_SELECTION_KEY: &str = "boutique_retrait";

/// Note attribute recording the customer's address before the rewrite.
pub const ORIGINAL_ADDRESS_KEY: &str = "adresse_client_originale";
