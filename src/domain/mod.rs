//! Core domain types: alerts, trigger records, and identifiers.
//!
//! Everything here is collaborator-agnostic; persistence and delivery
//! live behind the traits in [`crate::port`].

pub mod alert;
pub mod error;
pub mod id;
pub mod trigger;

pub use alert::Alert;
pub use error::DomainError;
pub use id::{AlertId, CoinId, UserId};
pub use trigger::{NotificationOutcome, TriggerRecord};
