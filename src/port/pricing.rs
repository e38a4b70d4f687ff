//! Upstream price-feed port.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::CoinId;
use crate::error::FetchError;

/// A single raw fetch against the upstream pricing dependency.
///
/// Implementations classify failures into [`FetchError`] kinds; they do
/// not retry or guard themselves. Resilience is layered on top by
/// [`PriceGateway`](crate::service::PriceGateway).
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Fetch the current price of `coin_id`.
    async fn fetch_price(&self, coin_id: &CoinId) -> Result<Decimal, FetchError>;
}
