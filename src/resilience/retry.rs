//! Retry with exponential backoff.
//!
//! [`with_retry`] wraps any fallible async operation: transient failures
//! are retried up to the policy's attempt budget with exponentially
//! growing delays; non-transient failures abort immediately. Exhausting
//! the budget re-raises the last failure tagged
//! [`RetryError::Exhausted`] - it is never swallowed.
//!
//! Error classification is by kind through the [`Recoverable`] trait,
//! never by message text.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tokio::time::sleep;
use tracing::{error, warn};

/// Classifies an error as transient (retryable) or not.
pub trait Recoverable {
    /// Whether retrying the failed operation could plausibly succeed.
    fn is_transient(&self) -> bool;
}

/// Immutable retry configuration; no runtime state.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total invocation budget, including the first attempt.
    pub max_attempts: u32,
    /// Delay before the first retry.
    pub base_delay: Duration,
    /// Growth factor applied to the delay after each failed attempt.
    pub backoff_multiplier: f64,
}

impl RetryPolicy {
    /// Create a policy; `max_attempts` of 0 is treated as 1.
    #[must_use]
    pub fn new(max_attempts: u32, base_delay: Duration, backoff_multiplier: f64) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
            backoff_multiplier,
        }
    }

    /// Delay slept after the given failed attempt (counted from 1):
    /// `base_delay × backoff_multiplier^(attempt − 1)`.
    #[must_use]
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let factor = self.backoff_multiplier.powi(attempt.saturating_sub(1) as i32);
        self.base_delay.mul_f64(factor)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            backoff_multiplier: 2.0,
        }
    }
}

/// Failure modes of a retried operation.
#[derive(Error, Debug)]
pub enum RetryError<E> {
    /// Every attempt in the budget failed; carries the last failure.
    #[error("operation failed after {attempts} attempts: {source}")]
    Exhausted {
        /// Attempts made, including the first.
        attempts: u32,
        /// The failure observed on the final attempt.
        source: E,
    },

    /// A non-transient failure; retrying would not help, so the
    /// operation was not re-invoked.
    #[error(transparent)]
    Fatal(E),
}

impl<E> RetryError<E> {
    /// The underlying failure, whichever way the retry ended.
    pub fn into_source(self) -> E {
        match self {
            RetryError::Exhausted { source, .. } | RetryError::Fatal(source) => source,
        }
    }
}

/// Invoke `operation`, retrying transient failures per `policy`.
///
/// The operation is invoked at most `policy.max_attempts` times. Between
/// attempts the task sleeps `base_delay × multiplier^(attempt − 1)`.
pub async fn with_retry<T, E, F, Fut>(policy: &RetryPolicy, mut operation: F) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Recoverable + std::fmt::Display,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if !err.is_transient() => {
                warn!(attempt, error = %err, "non-transient failure, not retrying");
                return Err(RetryError::Fatal(err));
            }
            Err(err) => {
                if attempt >= max_attempts {
                    error!(attempts = max_attempts, error = %err, "retry budget exhausted");
                    return Err(RetryError::Exhausted {
                        attempts: max_attempts,
                        source: err,
                    });
                }

                let delay = policy.delay_after(attempt);
                warn!(
                    attempt,
                    max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "operation failed, retrying"
                );
                sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
