//! Outbound adapters for external dependencies.

pub mod pricing;
