//! Error types for the crate.
//!
//! Failures are classified by variant so callers can branch
//! deterministically (for example, render "service unavailable" for
//! [`FetchError::CircuitOpen`] specifically). Never match on error text.

use thiserror::Error;

use crate::domain::DomainError;
use crate::resilience::Recoverable;

/// Failures raised while fetching a price from the upstream service.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request exceeded the configured timeout.
    #[error("price request timed out")]
    Timeout,

    /// The pricing service could not be reached.
    #[error("connection to pricing service failed: {0}")]
    Connection(String),

    /// The service answered, but outside its contract: non-2xx status,
    /// unparsable body, non-success envelope, or missing price field.
    /// A contract violation, not a transient fault; never retried.
    #[error("invalid pricing response: {0}")]
    InvalidResponse(String),

    /// The circuit guarding the dependency is open; the call was
    /// rejected without reaching the service.
    #[error("circuit '{name}' is open")]
    CircuitOpen {
        /// Name of the breaker that rejected the call.
        name: String,
    },

    /// Every retry attempt failed; carries the last failure.
    #[error("price fetch gave up after {attempts} attempts: {source}")]
    RetryExhausted {
        /// Total attempts made, including the first.
        attempts: u32,
        /// The failure observed on the final attempt.
        #[source]
        source: Box<FetchError>,
    },
}

impl Recoverable for FetchError {
    /// Only connection-level faults are worth retrying; everything else
    /// is a contract violation or an already-exhausted guard.
    fn is_transient(&self) -> bool {
        matches!(self, FetchError::Timeout | FetchError::Connection(_))
    }
}

/// Failures raised by the persistence collaborator.
///
/// Propagated to the caller of create/deactivate, never swallowed.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backing store reported a failure.
    #[error("store backend failure: {0}")]
    Backend(String),
}

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Top-level error for the crate.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, Error>;
