//! Process-wide breaker registry.
//!
//! One breaker per dependency name, created on first use with the
//! registry's default settings. The registry is owned by the composition
//! root and injected where needed, so breaker state stays visible,
//! inspectable, and resettable between test runs - never a hidden global.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;

use super::breaker::{BreakerSnapshot, CircuitBreaker};

/// Default settings applied to breakers created by a registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakerConfig {
    /// Consecutive failures before the circuit opens.
    pub failure_threshold: u32,
    /// How long an open circuit rejects calls before probing recovery.
    pub recovery_timeout: Duration,
}

impl Default for BreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 5,
            recovery_timeout: Duration::from_secs(60),
        }
    }
}

/// Registry of named circuit breakers.
#[derive(Debug, Default)]
pub struct BreakerRegistry {
    defaults: BreakerConfig,
    breakers: DashMap<String, Arc<CircuitBreaker>>,
}

impl BreakerRegistry {
    /// Create a registry whose breakers use the given defaults.
    #[must_use]
    pub fn new(defaults: BreakerConfig) -> Self {
        Self {
            defaults,
            breakers: DashMap::new(),
        }
    }

    /// Fetch the breaker for `name`, creating it on first use.
    #[must_use]
    pub fn get_or_create(&self, name: &str) -> Arc<CircuitBreaker> {
        self.breakers
            .entry(name.to_string())
            .or_insert_with(|| {
                Arc::new(CircuitBreaker::new(
                    name,
                    self.defaults.failure_threshold,
                    self.defaults.recovery_timeout,
                ))
            })
            .clone()
    }

    /// Snapshot the named breaker, if it exists.
    #[must_use]
    pub fn snapshot(&self, name: &str) -> Option<BreakerSnapshot> {
        self.breakers.get(name).map(|b| b.snapshot())
    }

    /// Reset the named breaker to Closed. Returns false when unknown.
    pub fn reset(&self, name: &str) -> bool {
        match self.breakers.get(name) {
            Some(breaker) => {
                breaker.reset();
                true
            }
            None => false,
        }
    }

    /// Reset every registered breaker. Intended for test harnesses.
    pub fn reset_all(&self) {
        for entry in self.breakers.iter() {
            entry.value().reset();
        }
    }

    /// Names of all registered breakers.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.breakers.iter().map(|e| e.key().clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::super::breaker::BreakerState;
    use super::*;

    #[test]
    fn same_name_yields_same_breaker() {
        let registry = BreakerRegistry::new(BreakerConfig::default());
        let a = registry.get_or_create("pricing_service");
        let b = registry.get_or_create("pricing_service");
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn distinct_names_are_independent() {
        let registry = BreakerRegistry::new(BreakerConfig::default());
        let a = registry.get_or_create("pricing_service");
        let b = registry.get_or_create("fx_service");
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(registry.names().len(), 2);
    }

    #[tokio::test]
    async fn reset_returns_breaker_to_closed() {
        let registry = BreakerRegistry::new(BreakerConfig {
            failure_threshold: 1,
            recovery_timeout: Duration::from_secs(60),
        });
        let breaker = registry.get_or_create("pricing_service");

        #[derive(thiserror::Error, Debug)]
        #[error("down")]
        struct Down;
        let _ = breaker.call(|| async { Err::<(), _>(Down) }).await;
        assert_eq!(
            registry.snapshot("pricing_service").unwrap().state,
            BreakerState::Open
        );

        assert!(registry.reset("pricing_service"));
        assert_eq!(
            registry.snapshot("pricing_service").unwrap().state,
            BreakerState::Closed
        );
        assert!(!registry.reset("unknown"));
    }
}
