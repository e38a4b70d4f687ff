//! Trait definitions (hexagonal ports). Depend only on domain.

mod notifier;
mod pricing;
mod store;

pub use notifier::{NotificationMetadata, Notifier};
pub use pricing::PriceSource;
pub use store::AlertStore;
