//! Pricewatch - resilient price-alert evaluation.
//!
//! This crate evaluates user-defined price-alert rules against a
//! volatile upstream price feed and dispatches notifications when a
//! threshold is crossed, while shielding itself from the feed's
//! failures.
//!
//! # Architecture
//!
//! Two tightly coupled pieces form the core:
//!
//! - **[`resilience`]** - composable retry and circuit-breaker guards,
//!   "operation in, operation out", placed in front of any fallible call
//!   to the upstream price dependency.
//! - **[`service`]** - the evaluation pipeline: [`service::PriceGateway`]
//!   (guarded fetch), [`service::AlertEvaluator`] (trigger decision +
//!   audit trail), [`service::BatchRunner`] (failure-isolated sweep),
//!   and [`service::AlertService`] (lifecycle operations).
//!
//! Persistence, delivery, and the raw price feed are collaborators
//! behind the traits in [`port`]; [`adapter`] carries the HTTP
//! implementation of the pricing port.
//!
//! # Modules
//!
//! - [`config`] - Configuration loading from TOML files
//! - [`domain`] - Alerts, trigger records, identifiers
//! - [`error`] - Error types for the crate
//! - [`port`] - Trait definitions for external collaborators
//! - [`resilience`] - Retry, circuit breaker, breaker registry
//! - [`service`] - Evaluation pipeline and alert lifecycle
//! - [`adapter`] - HTTP pricing-service client
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use pricewatch::adapter::outbound::pricing::HttpPriceSource;
//! use pricewatch::config::Config;
//! use pricewatch::resilience::BreakerRegistry;
//! use pricewatch::service::PriceGateway;
//!
//! let config = Config::default();
//! let registry = BreakerRegistry::new(config.breaker.defaults());
//! let source = Arc::new(HttpPriceSource::from_config(&config.pricing));
//! let breaker = registry.get_or_create(&config.pricing.breaker_name);
//! let gateway = PriceGateway::new(source, breaker, config.retry.policy());
//! ```

pub mod adapter;
pub mod config;
pub mod domain;
pub mod error;
pub mod port;
pub mod resilience;
pub mod service;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
