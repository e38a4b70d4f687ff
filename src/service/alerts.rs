//! Alert lifecycle operations: create, list, deactivate.
//!
//! Validation happens here, before input reaches the persistence
//! collaborator: a non-positive threshold is rejected with a
//! [`DomainError`](crate::domain::DomainError) and never reaches the
//! evaluator. Persistence failures propagate to the caller, never
//! swallowed.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::evaluator::AlertEvaluator;
use crate::domain::{alert, Alert, AlertId, CoinId, UserId};
use crate::error::Result;
use crate::port::AlertStore;

/// Application service for the alert lifecycle.
pub struct AlertService {
    store: Arc<dyn AlertStore>,
    evaluator: Arc<AlertEvaluator>,
}

impl AlertService {
    #[must_use]
    pub fn new(store: Arc<dyn AlertStore>, evaluator: Arc<AlertEvaluator>) -> Self {
        Self { store, evaluator }
    }

    /// Create an alert and attempt an immediate evaluation.
    ///
    /// The post-creation evaluation is best-effort: the price may
    /// already be past the threshold, and the user should hear about it
    /// now rather than at the next scheduled sweep. Its failure never
    /// fails the creation itself.
    pub async fn create(
        &self,
        user_id: &UserId,
        coin_id: CoinId,
        threshold_price: Decimal,
    ) -> Result<Alert> {
        alert::validate(&coin_id, threshold_price)?;

        let alert = self
            .store
            .create(user_id, &coin_id, threshold_price)
            .await?;

        match self.evaluator.evaluate(&alert).await {
            Ok(outcome) => {
                debug!(alert = %alert.id(), ?outcome, "post-creation evaluation");
            }
            Err(err) => {
                warn!(
                    alert = %alert.id(),
                    error = %err,
                    "post-creation evaluation failed"
                );
            }
        }

        Ok(alert)
    }

    /// List the user's active alerts.
    pub async fn list(&self, user_id: &UserId) -> Result<Vec<Alert>> {
        Ok(self.store.list_active(Some(user_id)).await?)
    }

    /// Deactivate an alert.
    ///
    /// Returns `Ok(false)` when the alert is unknown or already
    /// deactivated; deactivation is idempotent and never an error.
    pub async fn deactivate(&self, id: &AlertId) -> Result<bool> {
        Ok(self.store.deactivate(id).await?)
    }
}
