//! HTTP client for the Shopify Admin REST order endpoint.
//!
//! Sends exactly one `PUT /admin/api/{version}/orders/{id}.json` per rewritten
//! order. A non-2xx answer is turned into [`UpdateError::Rejected`] with the
//! response body captured for logs; nothing is retried.

use std::{fmt, time::Duration};

use pickup_core::{OrderId, OrderUpdate};
use reqwest::Response;
use serde::Serialize;
use tracing::{info_span, Instrument};

use crate::error::{Result, UpdateError};

/// Header carrying the Admin API access token.
pub const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Configuration for the order update client.
#[derive(Clone)]
pub struct ClientConfig {
    /// Scheme and host of the shop, e.g. `https://example.myshopify.com`.
    pub base_url: String,
    /// Admin API version segment, e.g. `2024-01`.
    pub api_version: String,
    /// Admin API access token.
    pub access_token: String,
    /// Timeout for the whole request, connect to last body byte.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_version: "2024-01".to_string(),
            access_token: String::new(),
            timeout: Duration::from_secs(10),
            user_agent: "pickup-router/0.1".to_string(),
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("access_token", &"***")
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Successful update response.
#[derive(Debug, Clone)]
pub struct UpdateResponse {
    /// HTTP status code (always 2xx).
    pub status_code: u16,
    /// Total duration of the request.
    pub duration: Duration,
}

/// JSON body of the update request: `{"order": {...}}`.
#[derive(Debug, Serialize)]
struct OrderEnvelope<'a> {
    order: &'a OrderUpdate,
}

/// Client that pushes rewritten pickup orders to Shopify.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct OrderUpdateClient {
    client: reqwest::Client,
    config: ClientConfig,
}

impl OrderUpdateClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `UpdateError::ConfigurationError` if the HTTP client cannot be
    /// built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| UpdateError::configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// URL of the per-order update endpoint.
    pub fn order_url(&self, id: OrderId) -> String {
        format!(
            "{}/admin/api/{}/orders/{id}.json",
            self.config.base_url.trim_end_matches('/'),
            self.config.api_version
        )
    }

    /// Sends the update for one order.
    ///
    /// # Errors
    ///
    /// - `Timeout` if Shopify does not answer within the configured timeout
    /// - `NetworkError` for connection failures
    /// - `Rejected` for any non-2xx status, with the body captured
    pub async fn update_order(&self, update: &OrderUpdate) -> Result<UpdateResponse> {
        let start_time = std::time::Instant::now();
        let url = self.order_url(update.id);

        let span = info_span!("shopify_order_update", order_id = %update.id, url = %url);

        async move {
            tracing::debug!("Sending order update");

            let response = match self
                .client
                .put(&url)
                .header(ACCESS_TOKEN_HEADER, &self.config.access_token)
                .json(&OrderEnvelope { order: update })
                .send()
                .await
            {
                Ok(response) => response,
                Err(e) => {
                    let duration = start_time.elapsed();
                    tracing::warn!(duration_ms = duration.as_millis(), "Request failed: {}", e);

                    if e.is_timeout() {
                        return Err(UpdateError::timeout(self.config.timeout.as_secs()));
                    }
                    if e.is_connect() {
                        return Err(UpdateError::network(format!("connection failed: {e}")));
                    }
                    return Err(UpdateError::network(e.to_string()));
                },
            };

            let duration = start_time.elapsed();
            let status_code = response.status().as_u16();

            tracing::debug!(status = status_code, duration_ms = duration.as_millis(), "Received response");

            if response.status().is_success() {
                tracing::info!("Order updated successfully");
                return Ok(UpdateResponse { status_code, duration });
            }

            let body = read_body(response).await;
            tracing::warn!(status = status_code, body = %body, "Shopify update error");
            Err(UpdateError::rejected(status_code, body))
        }
        .instrument(span)
        .await
    }
}

/// Reads a failed response body for diagnostics, truncating large bodies.
async fn read_body(response: Response) -> String {
    const MAX_BODY_SIZE: usize = 4 * 1024;

    match response.bytes().await {
        Ok(bytes) if bytes.len() > MAX_BODY_SIZE => {
            let suffix = "... (truncated)";
            let truncated = String::from_utf8_lossy(&bytes[..MAX_BODY_SIZE - suffix.len()]);
            format!("{truncated}{suffix}")
        },
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => {
            tracing::warn!("Failed to read response body: {}", e);
            format!("[Failed to read response body: {e}]")
        },
    }
}
