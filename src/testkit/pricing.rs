//! Mock [`PriceSource`] implementations for testing.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use rust_decimal::Decimal;

use crate::domain::CoinId;
use crate::error::FetchError;
use crate::port::PriceSource;

/// A mock price source with a scripted queue of fetch results.
///
/// Each `fetch_price` call pops the next scripted result. When the queue
/// is exhausted, a per-coin price map is consulted, then a flat fallback
/// price (default zero, which triggers nothing). A shared call counter
/// supports asserting exact invocation counts.
#[derive(Default)]
pub struct ScriptedPriceSource {
    results: Mutex<VecDeque<Result<Decimal, FetchError>>>,
    prices: Mutex<HashMap<CoinId, Decimal>>,
    fallback: Decimal,
    calls: AtomicU32,
}

impl ScriptedPriceSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue results returned in order by upcoming fetches.
    #[must_use]
    pub fn with_results(self, results: Vec<Result<Decimal, FetchError>>) -> Self {
        *self.results.lock() = results.into();
        self
    }

    /// Price returned for `coin` once the scripted queue is exhausted.
    #[must_use]
    pub fn with_price(self, coin: &str, price: Decimal) -> Self {
        self.prices.lock().insert(CoinId::new(coin), price);
        self
    }

    /// Flat price returned when neither queue nor map apply.
    #[must_use]
    pub fn with_fallback(mut self, price: Decimal) -> Self {
        self.fallback = price;
        self
    }

    /// Replace the current price for `coin` mid-test.
    pub fn set_price(&self, coin: &str, price: Decimal) {
        self.prices.lock().insert(CoinId::new(coin), price);
    }

    /// Append one more scripted result mid-test.
    pub fn push_result(&self, result: Result<Decimal, FetchError>) {
        self.results.lock().push_back(result);
    }

    /// Number of `fetch_price` invocations so far.
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PriceSource for ScriptedPriceSource {
    async fn fetch_price(&self, coin_id: &CoinId) -> Result<Decimal, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(result) = self.results.lock().pop_front() {
            return result;
        }
        if let Some(price) = self.prices.lock().get(coin_id) {
            return Ok(*price);
        }
        Ok(self.fallback)
    }
}
