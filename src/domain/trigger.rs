//! Append-only audit record for fired alerts.
//!
//! One [`TriggerRecord`] is written per evaluation that crosses the
//! threshold, independent of whether the notification was delivered. The
//! audit trail answers "what fired, at what price, and did the user hear
//! about it" even when delivery failed.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::alert::Alert;
use super::id::{AlertId, CoinId};

/// Outcome of the notification attempt made for a trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationOutcome {
    /// The notifier reported the notification as sent.
    Delivered,
    /// The notifier reported a delivery failure.
    Failed,
}

impl NotificationOutcome {
    /// Build an outcome from the notifier's boolean report.
    #[must_use]
    pub fn from_delivered(delivered: bool) -> Self {
        if delivered {
            Self::Delivered
        } else {
            Self::Failed
        }
    }
}

/// Audit entry recording a single threshold crossing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerRecord {
    id: String,
    alert_id: AlertId,
    coin_id: CoinId,
    observed_price: Decimal,
    /// Threshold as configured at evaluation time; the alert may be
    /// mutated later, the record never is.
    threshold_price: Decimal,
    notification: NotificationOutcome,
    triggered_at: DateTime<Utc>,
}

impl TriggerRecord {
    /// Create a record for `alert` observed at `observed_price`.
    #[must_use]
    pub fn new(alert: &Alert, observed_price: Decimal, notification: NotificationOutcome) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            alert_id: alert.id().clone(),
            coin_id: alert.coin_id().clone(),
            observed_price,
            threshold_price: alert.threshold_price(),
            notification,
            triggered_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn alert_id(&self) -> &AlertId {
        &self.alert_id
    }

    #[must_use]
    pub fn coin_id(&self) -> &CoinId {
        &self.coin_id
    }

    #[must_use]
    pub fn observed_price(&self) -> Decimal {
        self.observed_price
    }

    #[must_use]
    pub fn threshold_price(&self) -> Decimal {
        self.threshold_price
    }

    #[must_use]
    pub fn notification(&self) -> NotificationOutcome {
        self.notification
    }

    #[must_use]
    pub fn triggered_at(&self) -> DateTime<Utc> {
        self.triggered_at
    }
}
