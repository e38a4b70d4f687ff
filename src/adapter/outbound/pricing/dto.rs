//! Wire types for the pricing-service JSON envelope.
//!
//! The upstream contract:
//!
//! ```json
//! { "status": "success", "data": { "current_price": 51000.0 } }
//! ```
//!
//! Anything else - a non-success marker, a missing field, an unparsable
//! body - is a contract violation, classified as
//! [`FetchError::InvalidResponse`](crate::error::FetchError::InvalidResponse).

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::FetchError;

/// Envelope returned by `GET {base_url}/api/coin/{coin_id}`.
#[derive(Debug, Deserialize)]
pub struct PriceEnvelope {
    #[serde(default)]
    pub status: String,
    pub data: Option<PriceData>,
}

/// Payload section of the envelope.
#[derive(Debug, Deserialize)]
pub struct PriceData {
    pub current_price: Option<Decimal>,
}

impl PriceEnvelope {
    /// Extract the price, enforcing the success marker and the presence
    /// of the numeric field.
    pub fn into_price(self) -> Result<Decimal, FetchError> {
        if self.status != "success" {
            return Err(FetchError::InvalidResponse(format!(
                "unexpected status marker '{}'",
                self.status
            )));
        }
        self.data
            .and_then(|data| data.current_price)
            .ok_or_else(|| FetchError::InvalidResponse("missing data.current_price".into()))
    }
}
