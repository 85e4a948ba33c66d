//! Pickup router HTTP API.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::sync::Arc;

use pickup_core::StoreDirectory;
use pickup_shopify::OrderUpdateClient;

pub mod config;
pub mod crypto;
pub mod handlers;
pub mod server;

pub use config::Config;
pub use server::{create_router, start_server};

/// Shared state handed to every handler.
///
/// Everything in here is read-only after startup, so concurrent webhook
/// deliveries need no coordination.
#[derive(Clone)]
pub struct AppState {
    /// Boutique directory used to resolve `boutique_retrait` notes.
    pub stores: Arc<StoreDirectory>,
    /// Client for pushing rewritten orders to Shopify.
    pub shopify: OrderUpdateClient,
    /// Secret used to verify webhook signatures.
    pub webhook_secret: Arc<str>,
}

impl AppState {
    /// Creates application state from its parts.
    pub fn new(
        stores: StoreDirectory,
        shopify: OrderUpdateClient,
        webhook_secret: impl Into<Arc<str>>,
    ) -> Self {
        Self { stores: Arc::new(stores), shopify, webhook_secret: webhook_secret.into() }
    }

    /// Builds application state from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the Shopify client cannot be constructed.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let shopify = OrderUpdateClient::new(config.to_client_config())?;
        Ok(Self::new(config.store_directory(), shopify, config.shopify_webhook_secret.as_str()))
    }
}
