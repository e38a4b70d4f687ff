//! Pricing-service adapter: HTTP client and wire DTOs.

mod client;
mod dto;

pub use client::HttpPriceSource;
pub use dto::{PriceData, PriceEnvelope};
