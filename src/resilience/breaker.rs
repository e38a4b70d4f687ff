//! Named circuit breaker guarding one upstream dependency.
//!
//! State machine:
//!
//! | From      | Condition                                   | To        |
//! |-----------|---------------------------------------------|-----------|
//! | Closed    | failure_count ≥ threshold                   | Open      |
//! | Open      | recovery timeout elapsed, on next call      | HalfOpen  |
//! | HalfOpen  | trial call succeeds                         | Closed    |
//! | HalfOpen  | trial call fails                            | Open      |
//!
//! While Open, calls are rejected with [`BreakerError::Open`] without
//! invoking the wrapped operation. While HalfOpen, exactly one trial
//! call is allowed through at a time; concurrent callers are rejected
//! as if the circuit were still open.
//!
//! All state lives behind a single mutex per breaker, so concurrent
//! callers cannot race on the failure count or the phase transitions.
//! The lock is never held across an await point. Timing uses
//! `tokio::time::Instant`, so paused-time tests can drive recovery.

use std::future::Future;
use std::time::Duration;

use parking_lot::Mutex;
use thiserror::Error;
use tokio::time::Instant;
use tracing::{error, info, warn};

/// Externally visible breaker state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakerState {
    /// Normal operation; calls pass through.
    Closed,
    /// Failing; calls are rejected until the recovery timeout elapses.
    Open,
    /// Probing recovery with a single trial call.
    HalfOpen,
}

/// Point-in-time view of a breaker, for inspection and assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakerSnapshot {
    pub state: BreakerState,
    pub failure_count: u32,
}

/// Failure modes of a guarded call.
#[derive(Error, Debug)]
pub enum BreakerError<E> {
    /// The circuit is open; the operation was not invoked.
    #[error("circuit '{name}' is open")]
    Open {
        /// Name of the rejecting breaker.
        name: String,
    },

    /// The operation was invoked and failed; the failure was counted.
    #[error(transparent)]
    Inner(E),
}

#[derive(Debug, Clone, Copy)]
enum Phase {
    Closed,
    Open { since: Instant },
    HalfOpen { trial_started: Instant },
}

#[derive(Debug)]
struct Inner {
    phase: Phase,
    failure_count: u32,
}

/// A named circuit-breaker state machine.
///
/// Shared by every concurrent caller targeting the same dependency name;
/// lives for the process lifetime and is never persisted. Obtain shared
/// instances through [`BreakerRegistry`](super::BreakerRegistry).
#[derive(Debug)]
pub struct CircuitBreaker {
    name: String,
    failure_threshold: u32,
    recovery_timeout: Duration,
    inner: Mutex<Inner>,
}

impl CircuitBreaker {
    /// Create a closed breaker for the named dependency.
    #[must_use]
    pub fn new(name: impl Into<String>, failure_threshold: u32, recovery_timeout: Duration) -> Self {
        Self {
            name: name.into(),
            failure_threshold: failure_threshold.max(1),
            recovery_timeout,
            inner: Mutex::new(Inner {
                phase: Phase::Closed,
                failure_count: 0,
            }),
        }
    }

    /// The dependency name this breaker guards.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Execute `operation` under the breaker.
    ///
    /// Every inner error counts toward the failure threshold, including
    /// non-retryable ones; the upstream is misbehaving either way.
    pub async fn call<T, E, F, Fut>(&self, operation: F) -> Result<T, BreakerError<E>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        if !self.try_acquire() {
            return Err(BreakerError::Open {
                name: self.name.clone(),
            });
        }

        match operation().await {
            Ok(value) => {
                self.on_success();
                Ok(value)
            }
            Err(err) => {
                self.on_failure(&err);
                Err(BreakerError::Inner(err))
            }
        }
    }

    /// Current state and failure count.
    ///
    /// An Open breaker whose recovery timeout has elapsed still reports
    /// Open; the HalfOpen transition happens on the next call.
    #[must_use]
    pub fn snapshot(&self) -> BreakerSnapshot {
        let inner = self.inner.lock();
        let state = match inner.phase {
            Phase::Closed => BreakerState::Closed,
            Phase::Open { .. } => BreakerState::Open,
            Phase::HalfOpen { .. } => BreakerState::HalfOpen,
        };
        BreakerSnapshot {
            state,
            failure_count: inner.failure_count,
        }
    }

    /// Force the breaker back to Closed with a zero failure count.
    pub fn reset(&self) {
        let mut inner = self.inner.lock();
        inner.phase = Phase::Closed;
        inner.failure_count = 0;
    }

    /// Decide whether a call may proceed, transitioning Open → HalfOpen
    /// when the recovery timeout has elapsed.
    fn try_acquire(&self) -> bool {
        let mut inner = self.inner.lock();
        match inner.phase {
            Phase::Closed => true,
            Phase::Open { since } => {
                if since.elapsed() >= self.recovery_timeout {
                    info!(breaker = %self.name, "circuit entering half-open, allowing trial call");
                    inner.phase = Phase::HalfOpen {
                        trial_started: Instant::now(),
                    };
                    true
                } else {
                    false
                }
            }
            Phase::HalfOpen { trial_started } => {
                // A trial is already in flight. Allow a replacement only
                // if the previous trial was abandoned (its future dropped)
                // longer than the recovery timeout ago.
                if trial_started.elapsed() >= self.recovery_timeout {
                    warn!(breaker = %self.name, "stale half-open trial, allowing a new one");
                    inner.phase = Phase::HalfOpen {
                        trial_started: Instant::now(),
                    };
                    true
                } else {
                    false
                }
            }
        }
    }

    fn on_success(&self) {
        let mut inner = self.inner.lock();
        if matches!(inner.phase, Phase::HalfOpen { .. }) {
            info!(breaker = %self.name, "trial call succeeded, circuit closed");
        }
        inner.phase = Phase::Closed;
        inner.failure_count = 0;
    }

    fn on_failure<E: std::fmt::Display>(&self, err: &E) {
        let mut inner = self.inner.lock();
        inner.failure_count += 1;
        match inner.phase {
            Phase::HalfOpen { .. } => {
                warn!(breaker = %self.name, error = %err, "trial call failed, circuit reopened");
                inner.phase = Phase::Open {
                    since: Instant::now(),
                };
            }
            Phase::Closed if inner.failure_count >= self.failure_threshold => {
                error!(
                    breaker = %self.name,
                    failures = inner.failure_count,
                    "failure threshold reached, circuit opened"
                );
                inner.phase = Phase::Open {
                    since: Instant::now(),
                };
            }
            _ => {}
        }
    }
}
