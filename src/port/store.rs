//! Persistence port for alerts and their audit trail.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::{Alert, AlertId, CoinId, TriggerRecord, UserId};
use crate::error::StoreError;

/// Persistence collaborator owning [`Alert`] records.
///
/// Implementations guarantee their own concurrency safety. `list_active`
/// returns alerts in the store's natural iteration order, which batch
/// evaluation preserves for determinism in tests.
#[async_trait]
pub trait AlertStore: Send + Sync {
    /// Persist a new active alert. Domain validation happens before
    /// this call; the store only rejects backend failures.
    async fn create(
        &self,
        user_id: &UserId,
        coin_id: &CoinId,
        threshold_price: Decimal,
    ) -> Result<Alert, StoreError>;

    /// List active alerts, optionally restricted to one user.
    async fn list_active(&self, user_id: Option<&UserId>) -> Result<Vec<Alert>, StoreError>;

    /// Deactivate an alert. Returns `Ok(false)` when the alert is
    /// unknown or already inactive; never an error for that case.
    async fn deactivate(&self, id: &AlertId) -> Result<bool, StoreError>;

    /// Append one audit record. The trail is append-only.
    async fn append_trigger(&self, record: TriggerRecord) -> Result<(), StoreError>;
}
