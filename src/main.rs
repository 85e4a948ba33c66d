//! Pickup router service.
//!
//! Receives Shopify `orders/create` webhooks and rewrites the shipping
//! address of in-store pickup orders to the selected boutique.

use anyhow::{Context, Result};
use pickup_api::{start_server, AppState, Config};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;

    init_tracing(&config.rust_log);

    info!(
        shop = %config.shopify_shop,
        api_version = %config.shopify_api_version,
        access_token = %config.access_token_masked(),
        port = config.port,
        "Configuration loaded"
    );

    if config.shopify_webhook_secret.is_empty() {
        warn!("SHOPIFY_WEBHOOK_SECRET is empty; signed webhooks will be rejected");
    }
    warn!("Unsigned webhook requests are accepted without verification");

    let addr = config.parse_server_addr()?;
    let state = AppState::from_config(&config).context("Failed to build application state")?;
    info!(boutiques = state.stores.len(), "Boutique directory loaded");

    start_server(state, addr, config.request_timeout()).await.context("Server failed")?;

    info!("Pickup router shutdown complete");
    Ok(())
}

/// Initializes tracing, preferring `RUST_LOG` from the environment over the
/// configured level.
fn init_tracing(configured: &str) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(configured))
        .unwrap_or_else(|_| EnvFilter::new("info,pickup=debug,tower_http=debug"));

    let fmt_layer = fmt::layer().with_target(true).with_file(true).with_line_number(true);

    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}
