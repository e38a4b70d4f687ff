//! Batch evaluation: sweep every active alert in one pass.
//!
//! Each alert is evaluated independently; a failure while evaluating one
//! alert is caught, logged, and excluded from the summary without
//! aborting the rest. Alerts are swept sequentially in the store's
//! natural iteration order - no cross-alert ordering is semantically
//! required, but determinism keeps tests honest. The only shared mutable
//! structure is the breaker state, which is internally synchronized.

use std::sync::Arc;

use tracing::{error, info};

use super::evaluator::{AlertEvaluator, Evaluation};
use crate::domain::Alert;
use crate::error::Result;
use crate::port::AlertStore;

/// Tally of one batch run.
///
/// `evaluated` counts alerts whose threshold comparison completed
/// (triggered or not); `skipped` counts alerts whose price was
/// unavailable. Alerts whose evaluation failed outright appear in
/// neither.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub evaluated: usize,
    pub triggered: usize,
    pub skipped: usize,
}

/// Runs a collection of alerts through the evaluator.
pub struct BatchRunner {
    store: Arc<dyn AlertStore>,
    evaluator: Arc<AlertEvaluator>,
}

impl BatchRunner {
    #[must_use]
    pub fn new(store: Arc<dyn AlertStore>, evaluator: Arc<AlertEvaluator>) -> Self {
        Self { store, evaluator }
    }

    /// Evaluate the given alerts in order, isolating per-alert failures.
    pub async fn run(&self, alerts: &[Alert]) -> BatchSummary {
        let mut summary = BatchSummary::default();

        for alert in alerts {
            match self.evaluator.evaluate(alert).await {
                Ok(Evaluation::Triggered) => {
                    summary.evaluated += 1;
                    summary.triggered += 1;
                }
                Ok(Evaluation::NotMet) => summary.evaluated += 1,
                Ok(Evaluation::Skipped) => summary.skipped += 1,
                Err(err) => {
                    error!(
                        alert = %alert.id(),
                        error = %err,
                        "evaluation failed, continuing batch"
                    );
                }
            }
        }

        info!(
            total = alerts.len(),
            evaluated = summary.evaluated,
            triggered = summary.triggered,
            skipped = summary.skipped,
            "batch run complete"
        );
        summary
    }

    /// List all active alerts from the store and run them.
    ///
    /// # Errors
    ///
    /// Only the initial listing can fail; per-alert failures are
    /// contained by [`Self::run`].
    pub async fn sweep(&self) -> Result<BatchSummary> {
        let alerts = self.store.list_active(None).await?;
        Ok(self.run(&alerts).await)
    }
}
