//! Configuration loading from TOML files.
//!
//! Every section carries serde defaults, so a partial file (or none at
//! all, via [`Config::default`]) yields a working configuration. Values
//! are validated structurally at load time; a bad file fails fast with a
//! [`ConfigError`] instead of surfacing later as a runtime fault.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};
use url::Url;

use crate::error::ConfigError;
use crate::resilience::{BreakerConfig, RetryPolicy};

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub pricing: PricingConfig,
    pub retry: RetryConfig,
    pub breaker: BreakerSettings,
    pub logging: LoggingConfig,
}

/// Upstream pricing-service settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Base URL of the pricing service.
    pub base_url: String,
    /// Whole-request timeout; bounds every fetch so one unresponsive
    /// dependency cannot stall a batch.
    pub request_timeout_ms: u64,
    /// TCP connect timeout.
    pub connect_timeout_ms: u64,
    /// Breaker name the gateway binds to for this dependency.
    pub breaker_name: String,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8081/pricing-service".into(),
            request_timeout_ms: 5_000,
            connect_timeout_ms: 2_000,
            breaker_name: "pricing_service".into(),
        }
    }
}

/// Retry settings for calls to the pricing service.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 1_000,
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryConfig {
    /// Build the immutable policy handed to the resilience layer.
    #[must_use]
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.max_attempts,
            Duration::from_millis(self.base_delay_ms),
            self.backoff_multiplier,
        )
    }
}

/// Circuit-breaker defaults applied by the registry.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BreakerSettings {
    pub failure_threshold: u32,
    pub recovery_timeout_secs: u64,
}

impl Default for BreakerSettings {
    fn default() -> Self {
        Self {
            failure_threshold: 5,
            recovery_timeout_secs: 60,
        }
    }
}

impl BreakerSettings {
    /// Build the defaults handed to [`BreakerRegistry`](crate::resilience::BreakerRegistry).
    #[must_use]
    pub fn defaults(&self) -> BreakerConfig {
        BreakerConfig {
            failure_threshold: self.failure_threshold,
            recovery_timeout: Duration::from_secs(self.recovery_timeout_secs),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl LoggingConfig {
    /// Initialize the tracing subscriber with this logging configuration.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        match self.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}

impl Config {
    /// Load and validate configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        Url::parse(&self.pricing.base_url).map_err(|e| ConfigError::InvalidValue {
            field: "pricing.base_url",
            reason: e.to_string(),
        })?;
        if self.pricing.request_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "pricing.request_timeout_ms",
                reason: "must be greater than 0".into(),
            });
        }
        if self.pricing.breaker_name.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "pricing.breaker_name",
                reason: "cannot be empty".into(),
            });
        }
        if self.retry.max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "retry.max_attempts",
                reason: "must be at least 1".into(),
            });
        }
        if self.retry.backoff_multiplier < 1.0 {
            return Err(ConfigError::InvalidValue {
                field: "retry.backoff_multiplier",
                reason: "must be at least 1.0".into(),
            });
        }
        if self.breaker.failure_threshold == 0 {
            return Err(ConfigError::InvalidValue {
                field: "breaker.failure_threshold",
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let config: Config = toml::from_str(
            r#"
            [pricing]
            base_url = "https://pricing.example.com"
            "#,
        )
        .unwrap();
        assert_eq!(config.pricing.base_url, "https://pricing.example.com");
        assert_eq!(config.pricing.request_timeout_ms, 5_000);
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.breaker.failure_threshold, 5);
    }

    #[test]
    fn rejects_unparsable_base_url() {
        let config: Config = toml::from_str(
            r#"
            [pricing]
            base_url = "not a url"
            "#,
        )
        .unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue {
                field: "pricing.base_url",
                ..
            })
        ));
    }

    #[test]
    fn rejects_zero_retry_attempts() {
        let config: Config = toml::from_str(
            r#"
            [retry]
            max_attempts = 0
            "#,
        )
        .unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue {
                field: "retry.max_attempts",
                ..
            })
        ));
    }

    #[test]
    fn retry_section_converts_to_policy() {
        let config = Config::default();
        let policy = config.retry.policy();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.base_delay, Duration::from_secs(1));
    }
}
