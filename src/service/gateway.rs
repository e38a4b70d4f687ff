//! Guarded access to the upstream price feed.
//!
//! [`PriceGateway`] composes the resilience primitives around the raw
//! [`PriceSource`] port, breaker-outermost: an open circuit rejects
//! instantly without burning retry attempts against a known-down
//! dependency. The inverse composition is deliberately not offered.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::domain::CoinId;
use crate::error::FetchError;
use crate::port::PriceSource;
use crate::resilience::{with_retry, BreakerError, CircuitBreaker, RetryError, RetryPolicy};

/// Fetches a coin's current price through retry + circuit-breaker guards.
///
/// The breaker is shared: every gateway (and any other caller) bound to
/// the same dependency name sees the same state. Obtain it from the
/// composition root's [`BreakerRegistry`](crate::resilience::BreakerRegistry).
pub struct PriceGateway {
    source: Arc<dyn PriceSource>,
    breaker: Arc<CircuitBreaker>,
    retry: RetryPolicy,
}

impl PriceGateway {
    /// Create a gateway over `source`, guarded by `breaker` and `retry`.
    #[must_use]
    pub fn new(source: Arc<dyn PriceSource>, breaker: Arc<CircuitBreaker>, retry: RetryPolicy) -> Self {
        Self {
            source,
            breaker,
            retry,
        }
    }

    /// The breaker guarding this gateway, for inspection.
    #[must_use]
    pub fn breaker(&self) -> &Arc<CircuitBreaker> {
        &self.breaker
    }

    /// Fetch the current price of `coin_id` under the guards.
    ///
    /// # Errors
    ///
    /// - [`FetchError::CircuitOpen`] when the breaker rejects the call
    ///   without invoking the upstream.
    /// - [`FetchError::RetryExhausted`] when every retry attempt failed,
    ///   carrying the last failure.
    /// - The underlying [`FetchError`] itself for non-retryable failures
    ///   such as [`FetchError::InvalidResponse`].
    pub async fn fetch(&self, coin_id: &CoinId) -> Result<Decimal, FetchError> {
        let result = self
            .breaker
            .call(|| with_retry(&self.retry, || self.source.fetch_price(coin_id)))
            .await;

        match result {
            Ok(price) => Ok(price),
            Err(BreakerError::Open { name }) => Err(FetchError::CircuitOpen { name }),
            Err(BreakerError::Inner(RetryError::Exhausted { attempts, source })) => {
                Err(FetchError::RetryExhausted {
                    attempts,
                    source: Box::new(source),
                })
            }
            Err(BreakerError::Inner(RetryError::Fatal(err))) => Err(err),
        }
    }
}
