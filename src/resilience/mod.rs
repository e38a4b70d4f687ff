//! Composable retry and circuit-breaker guards.
//!
//! Both primitives are "operation in, operation out": they take a
//! fallible async operation and return a guarded one, so they compose
//! around any call to an unreliable dependency.
//!
//! Composition order matters: the breaker must wrap the retry
//! (breaker-outermost), so an open circuit rejects instantly instead of
//! burning retry attempts against a known-down dependency.
//! [`crate::service::PriceGateway`] wires them in that order.

pub mod breaker;
pub mod registry;
pub mod retry;

pub use breaker::{BreakerError, BreakerSnapshot, BreakerState, CircuitBreaker};
pub use registry::{BreakerConfig, BreakerRegistry};
pub use retry::{with_retry, Recoverable, RetryError, RetryPolicy};
