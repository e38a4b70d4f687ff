//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`pricing`] — [`ScriptedPriceSource`], a scripted
//!   [`PriceSource`](crate::port::PriceSource) double.
//! - [`store`] — [`InMemoryAlertStore`] with optional scripted failures.
//! - [`notifier`] — [`RecordingNotifier`] capturing every send.
//! - [`domain`] — builders for test alerts.

pub mod domain;
pub mod notifier;
pub mod pricing;
pub mod store;

pub use notifier::{RecordingNotifier, SentNotification};
pub use pricing::ScriptedPriceSource;
pub use store::InMemoryAlertStore;
