//! Domain validation errors for core domain types.
//!
//! These errors are returned by `try_new` constructors that validate
//! inputs before an alert ever reaches the store or the evaluator.

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Threshold prices must be strictly positive.
    #[error("threshold price must be positive, got {threshold}")]
    NonPositiveThreshold {
        /// The invalid threshold that was provided.
        threshold: rust_decimal::Decimal,
    },

    /// Coin identifiers cannot be empty after normalization.
    #[error("coin id cannot be empty")]
    EmptyCoinId,
}
