//! Single-alert trigger decision and dispatch.
//!
//! An alert triggers iff the observed price is at or above its threshold
//! - a one-directional, non-strict comparison; alerts never fire on a
//! price falling below threshold. On trigger the notifier is invoked and
//! a [`TriggerRecord`] is appended whatever the delivery outcome, so the
//! audit trail is always completed.
//!
//! A price-fetch failure (including an open circuit) yields
//! [`Evaluation::Skipped`] and is logged; it never propagates to the
//! caller of [`AlertEvaluator::evaluate`].

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use super::gateway::PriceGateway;
use crate::domain::{Alert, NotificationOutcome, TriggerRecord};
use crate::error::Result;
use crate::port::{AlertStore, NotificationMetadata, Notifier};

/// Outcome of evaluating one alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evaluation {
    /// The price could not be fetched; no trigger decision was made.
    Skipped,
    /// The price was below the threshold.
    NotMet,
    /// The threshold was crossed; a notification was attempted and an
    /// audit record written.
    Triggered,
}

/// Decides trigger/no-trigger for one alert and dispatches the result.
pub struct AlertEvaluator {
    gateway: Arc<PriceGateway>,
    store: Arc<dyn AlertStore>,
    notifier: Arc<dyn Notifier>,
}

impl AlertEvaluator {
    /// Wire an evaluator to its collaborators.
    #[must_use]
    pub fn new(
        gateway: Arc<PriceGateway>,
        store: Arc<dyn AlertStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            gateway,
            store,
            notifier,
        }
    }

    /// Evaluate one alert against the current price.
    ///
    /// # Errors
    ///
    /// Only a failure to append the audit record propagates (as
    /// [`Error::Store`](crate::error::Error::Store)); fetch failures are
    /// absorbed into [`Evaluation::Skipped`].
    pub async fn evaluate(&self, alert: &Alert) -> Result<Evaluation> {
        let price = match self.gateway.fetch(alert.coin_id()).await {
            Ok(price) => price,
            Err(err) => {
                warn!(
                    alert = %alert.id(),
                    coin = %alert.coin_id(),
                    error = %err,
                    "price unavailable, skipping evaluation"
                );
                return Ok(Evaluation::Skipped);
            }
        };

        if price < alert.threshold_price() {
            debug!(
                alert = %alert.id(),
                coin = %alert.coin_id(),
                price = %price,
                threshold = %alert.threshold_price(),
                "threshold not met"
            );
            return Ok(Evaluation::NotMet);
        }

        let delivered = self.notify(alert, price).await;
        let record = TriggerRecord::new(alert, price, NotificationOutcome::from_delivered(delivered));
        self.store.append_trigger(record).await?;

        info!(
            alert = %alert.id(),
            coin = %alert.coin_id(),
            price = %price,
            threshold = %alert.threshold_price(),
            delivered,
            "alert triggered"
        );
        Ok(Evaluation::Triggered)
    }

    async fn notify(&self, alert: &Alert, price: Decimal) -> bool {
        let body = format!(
            "{} reached ${}",
            alert.coin_id().as_str().to_uppercase(),
            price.round_dp(2)
        );
        let metadata = NotificationMetadata {
            coin_id: alert.coin_id().clone(),
            current_price: price,
            threshold_price: alert.threshold_price(),
        };
        self.notifier
            .send(alert.user_id(), "Price Alert Triggered!", &body, metadata)
            .await
    }
}
