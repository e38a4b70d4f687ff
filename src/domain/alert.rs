//! Price-alert rule: a coin, a threshold, and an owning user.
//!
//! An [`Alert`] is owned by the persistence collaborator and mutated only
//! through explicit operations: creation via [`Alert::try_new`] and
//! deactivation via [`Alert::deactivate`]. There is no field-by-field
//! mutation from outside those operations.
//!
//! # Lifecycle
//!
//! `ACTIVE` (created, eligible for evaluation) → `DEACTIVATED` (terminal,
//! reached only via an explicit deactivation call). Triggering does not
//! transition state: an alert may fire on every evaluation while the price
//! stays at or above its threshold.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::{AlertId, CoinId, UserId};

/// Validate the invariants of a would-be alert.
///
/// Shared by [`Alert::try_new`] and by the alert service, which rejects
/// bad input before it ever reaches the persistence collaborator.
pub fn validate(coin_id: &CoinId, threshold_price: Decimal) -> Result<(), DomainError> {
    if threshold_price <= Decimal::ZERO {
        return Err(DomainError::NonPositiveThreshold {
            threshold: threshold_price,
        });
    }
    if coin_id.is_empty() {
        return Err(DomainError::EmptyCoinId);
    }
    Ok(())
}

/// A persisted rule pairing a coin and a threshold price with a
/// notification action for a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    id: AlertId,
    user_id: UserId,
    coin_id: CoinId,
    threshold_price: Decimal,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Alert {
    /// Create a new active alert, validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NonPositiveThreshold`] when `threshold_price`
    /// is not strictly positive, and [`DomainError::EmptyCoinId`] when the
    /// coin id normalizes to an empty string.
    pub fn try_new(
        user_id: UserId,
        coin_id: CoinId,
        threshold_price: Decimal,
    ) -> Result<Self, DomainError> {
        validate(&coin_id, threshold_price)?;

        let now = Utc::now();
        Ok(Self {
            id: AlertId::generate(),
            user_id,
            coin_id,
            threshold_price,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// The alert's identifier.
    #[must_use]
    pub fn id(&self) -> &AlertId {
        &self.id
    }

    /// The owning user.
    #[must_use]
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// The coin this alert watches.
    #[must_use]
    pub fn coin_id(&self) -> &CoinId {
        &self.coin_id
    }

    /// The threshold price at or above which the alert fires.
    #[must_use]
    pub fn threshold_price(&self) -> Decimal {
        self.threshold_price
    }

    /// Whether the alert is eligible for evaluation.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// When the alert was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When the alert was last modified.
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Mark the alert deactivated. Terminal; idempotent.
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }
}
