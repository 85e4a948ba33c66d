//! Configuration management for the pickup router.

use std::{net::SocketAddr, str::FromStr, time::Duration};

use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use pickup_core::{StoreDirectory, StoreRecord};
use pickup_shopify::ClientConfig;
use serde::{Deserialize, Serialize};

const CONFIG_FILE: &str = "config.toml";

/// Service configuration with defaults, file, and environment overrides.
///
/// Configuration is loaded in priority order:
/// 1. Environment variables (highest priority)
/// 2. Configuration file (`config.toml`)
/// 3. Built-in defaults (lowest priority)
///
/// Extra boutiques are declared in `config.toml` and layered over the seeded
/// directory:
///
/// ```toml
/// [[stores]]
/// key = "Marseille"
/// name = "MINELLI Marseille"
/// address1 = "10 rue Saint-Ferréol"
/// city = "Marseille"
/// zip = "13001"
/// country = "FR"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Shopify
    /// Shop domain, e.g. `example.myshopify.com`.
    ///
    /// Environment variable: `SHOPIFY_SHOP`
    #[serde(default, alias = "SHOPIFY_SHOP")]
    pub shopify_shop: String,
    /// Admin API access token.
    ///
    /// Environment variable: `SHOPIFY_ACCESS_TOKEN`
    #[serde(default, alias = "SHOPIFY_ACCESS_TOKEN")]
    pub shopify_access_token: String,
    /// Shared secret used to sign webhook deliveries.
    ///
    /// Environment variable: `SHOPIFY_WEBHOOK_SECRET`
    #[serde(default, alias = "SHOPIFY_WEBHOOK_SECRET")]
    pub shopify_webhook_secret: String,
    /// Admin API version used for order updates.
    ///
    /// Environment variable: `SHOPIFY_API_VERSION`
    #[serde(default = "default_api_version", alias = "SHOPIFY_API_VERSION")]
    pub shopify_api_version: String,
    /// Timeout for the order update request in seconds. Must be less than
    /// `request_timeout`.
    ///
    /// Environment variable: `SHOPIFY_TIMEOUT_SECONDS`
    #[serde(default = "default_shopify_timeout", alias = "SHOPIFY_TIMEOUT_SECONDS")]
    pub shopify_timeout_seconds: u64,

    // Server
    /// Server bind address.
    ///
    /// Environment variable: `HOST`
    #[serde(default = "default_host", alias = "HOST")]
    pub host: String,
    /// Server bind port.
    ///
    /// Environment variable: `PORT`
    #[serde(default = "default_port", alias = "PORT")]
    pub port: u16,
    /// Inbound request timeout in seconds.
    ///
    /// Environment variable: `REQUEST_TIMEOUT`
    #[serde(default = "default_request_timeout", alias = "REQUEST_TIMEOUT")]
    pub request_timeout: u64,

    // Boutiques
    /// Boutiques added to, or replacing, the seeded directory entries.
    #[serde(default)]
    pub stores: Vec<StoreRecord>,

    // Logging
    /// Log level configuration.
    ///
    /// Environment variable: `RUST_LOG`
    #[serde(default = "default_log_level", alias = "RUST_LOG")]
    pub rust_log: String,
}

impl Config {
    /// Load configuration from defaults, config file, and environment variable
    /// overrides.
    pub fn load() -> Result<Self> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(""));

        let config: Self = figment.extract().context("Failed to load configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Base URL of the shop's Admin API.
    pub fn shop_base_url(&self) -> String {
        format!("https://{}", self.shopify_shop)
    }

    /// Convert to the Shopify client configuration.
    pub fn to_client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.shop_base_url(),
            api_version: self.shopify_api_version.clone(),
            access_token: self.shopify_access_token.clone(),
            timeout: Duration::from_secs(self.shopify_timeout_seconds),
            ..Default::default()
        }
    }

    /// Seeded boutiques with the configured ones layered on top.
    pub fn store_directory(&self) -> StoreDirectory {
        StoreDirectory::seeded().with_records(self.stores.iter().cloned())
    }

    /// Inbound request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    /// Parse server socket address from host and port configuration.
    pub fn parse_server_addr(&self) -> Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.host, self.port);
        SocketAddr::from_str(&addr_str).context("Invalid server address")
    }

    /// Access token with all but the last four characters masked for logging.
    pub fn access_token_masked(&self) -> String {
        let token = &self.shopify_access_token;
        match token.char_indices().rev().nth(3) {
            Some((start, _)) if token.chars().count() > 8 => format!("***{}", &token[start..]),
            _ => "***".to_string(),
        }
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<()> {
        if self.shopify_shop.trim().is_empty() {
            anyhow::bail!("shopify_shop must be set");
        }

        if self.shopify_access_token.trim().is_empty() {
            anyhow::bail!("shopify_access_token must be set");
        }

        if self.port == 0 {
            anyhow::bail!("port must be greater than 0");
        }

        if self.shopify_timeout_seconds == 0 {
            anyhow::bail!("shopify_timeout_seconds must be greater than 0");
        }

        if self.request_timeout == 0 {
            anyhow::bail!("request_timeout must be greater than 0");
        }

        // The inbound timeout drops the handler; it must not fire while the
        // Shopify update is still in flight.
        if self.shopify_timeout_seconds >= self.request_timeout {
            anyhow::bail!(
                "shopify_timeout_seconds ({}) must be less than request_timeout ({})",
                self.shopify_timeout_seconds,
                self.request_timeout
            );
        }

        if let Some(store) = self.stores.iter().find(|store| store.key.trim().is_empty()) {
            anyhow::bail!("store '{}' has an empty key", store.name);
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            shopify_shop: String::new(),
            shopify_access_token: String::new(),
            shopify_webhook_secret: String::new(),
            shopify_api_version: default_api_version(),
            shopify_timeout_seconds: default_shopify_timeout(),
            host: default_host(),
            port: default_port(),
            request_timeout: default_request_timeout(),
            stores: Vec::new(),
            rust_log: default_log_level(),
        }
    }
}

fn default_api_version() -> String {
    "2024-01".to_string()
}

fn default_shopify_timeout() -> u64 {
    10
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_request_timeout() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}
