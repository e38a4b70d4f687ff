//! In-memory [`AlertStore`] for testing.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use rust_decimal::Decimal;

use crate::domain::{Alert, AlertId, CoinId, TriggerRecord, UserId};
use crate::error::StoreError;
use crate::port::AlertStore;

/// Vector-backed store with insertion-order iteration.
///
/// Audit appends can be made to fail for chosen alerts via
/// [`fail_append_for`](Self::fail_append_for), which lets tests exercise
/// per-alert failure isolation in the batch runner.
#[derive(Default)]
pub struct InMemoryAlertStore {
    alerts: Mutex<Vec<Alert>>,
    triggers: Mutex<Vec<TriggerRecord>>,
    failing_appends: Mutex<HashSet<AlertId>>,
    fail_all_appends: AtomicBool,
}

impl InMemoryAlertStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an existing alert directly, bypassing `create`.
    pub fn seed(&self, alert: Alert) {
        self.alerts.lock().push(alert);
    }

    /// Make `append_trigger` fail for records of the given alert.
    pub fn fail_append_for(&self, id: AlertId) {
        self.failing_appends.lock().insert(id);
    }

    /// Make every `append_trigger` fail until called with `false`.
    pub fn fail_all_appends(&self, fail: bool) {
        self.fail_all_appends.store(fail, Ordering::SeqCst);
    }

    /// All audit records written so far, in append order.
    #[must_use]
    pub fn triggers(&self) -> Vec<TriggerRecord> {
        self.triggers.lock().clone()
    }

    /// All stored alerts, active or not.
    #[must_use]
    pub fn alerts(&self) -> Vec<Alert> {
        self.alerts.lock().clone()
    }
}

#[async_trait]
impl AlertStore for InMemoryAlertStore {
    async fn create(
        &self,
        user_id: &UserId,
        coin_id: &CoinId,
        threshold_price: Decimal,
    ) -> Result<Alert, StoreError> {
        let alert = Alert::try_new(user_id.clone(), coin_id.clone(), threshold_price)
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        self.alerts.lock().push(alert.clone());
        Ok(alert)
    }

    async fn list_active(&self, user_id: Option<&UserId>) -> Result<Vec<Alert>, StoreError> {
        Ok(self
            .alerts
            .lock()
            .iter()
            .filter(|a| a.is_active())
            .filter(|a| user_id.map_or(true, |u| a.user_id() == u))
            .cloned()
            .collect())
    }

    async fn deactivate(&self, id: &AlertId) -> Result<bool, StoreError> {
        let mut alerts = self.alerts.lock();
        match alerts.iter_mut().find(|a| a.id() == id && a.is_active()) {
            Some(alert) => {
                alert.deactivate();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn append_trigger(&self, record: TriggerRecord) -> Result<(), StoreError> {
        if self.fail_all_appends.load(Ordering::SeqCst)
            || self.failing_appends.lock().contains(record.alert_id())
        {
            return Err(StoreError::Backend("scripted append failure".into()));
        }
        self.triggers.lock().push(record);
        Ok(())
    }
}
