//! Notifier port for alert delivery.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::{CoinId, UserId};

/// Structured payload attached to an alert notification.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationMetadata {
    pub coin_id: CoinId,
    pub current_price: Decimal,
    pub threshold_price: Decimal,
}

/// Delivery collaborator (push, email, webhook...).
///
/// Failures never escape this boundary: delivery outcome is reported as
/// a boolean, not an error, so the evaluator can complete the audit
/// trail either way. The target is resolved from the alert's stored
/// user identity; batch runs have no inbound request to source it from.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send a notification. Returns whether delivery succeeded.
    async fn send(
        &self,
        target: &UserId,
        title: &str,
        body: &str,
        metadata: NotificationMetadata,
    ) -> bool;
}
