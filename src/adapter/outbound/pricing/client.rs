//! HTTP client for the upstream pricing service.
//!
//! Implements the [`PriceSource`] port with reqwest. Each request is
//! bounded by the configured whole-request timeout (default 5s), so an
//! unresponsive dependency cannot stall a batch sweep. Failures are
//! classified into [`FetchError`] kinds here; retry and breaker guards
//! are layered on top by the gateway, never in this client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::dto::PriceEnvelope;
use crate::config::PricingConfig;
use crate::domain::CoinId;
use crate::error::FetchError;
use crate::port::PriceSource;

/// Reqwest-backed [`PriceSource`].
pub struct HttpPriceSource {
    http: HttpClient,
    base_url: String,
}

impl HttpPriceSource {
    /// Create a client from pricing configuration.
    #[must_use]
    pub fn from_config(config: &PricingConfig) -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn classify_send_error(err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Connection(err.to_string())
        }
    }
}

#[async_trait]
impl PriceSource for HttpPriceSource {
    async fn fetch_price(&self, coin_id: &CoinId) -> Result<Decimal, FetchError> {
        let url = format!("{}/api/coin/{}", self.base_url, coin_id);
        debug!(url = %url, coin = %coin_id, "Fetching price");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(Self::classify_send_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::InvalidResponse(format!(
                "http status {status}"
            )));
        }

        let envelope = response.json::<PriceEnvelope>().await.map_err(|err| {
            if err.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::InvalidResponse(format!("unparsable body: {err}"))
            }
        })?;

        let price = envelope.into_price()?;
        debug!(coin = %coin_id, price = %price, "Fetched price");
        Ok(price)
    }
}
