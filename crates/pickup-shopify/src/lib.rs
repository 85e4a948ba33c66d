//! Shopify Admin API client for rewritten pickup orders.
//!
//! # Example
//!
//! ```no_run
//! use pickup_core::{OrderId, OrderUpdate, ShippingAddress};
//! use pickup_shopify::{ClientConfig, OrderUpdateClient, UpdateError};
//!
//! # async fn example() -> Result<(), UpdateError> {
//! let client = OrderUpdateClient::new(ClientConfig {
//!     base_url: "https://example.myshopify.com".to_string(),
//!     access_token: "shpat_...".to_string(),
//!     ..Default::default()
//! })?;
//!
//! let update = OrderUpdate {
//!     id: OrderId(450_789_469),
//!     shipping_address: ShippingAddress::default(),
//!     note_attributes: Vec::new(),
//! };
//! client.update_order(&update).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod client;
pub mod error;

pub use client::{ClientConfig, OrderUpdateClient, UpdateResponse, ACCESS_TOKEN_HEADER};
pub use error::{Result, UpdateError};
