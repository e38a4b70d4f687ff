//! Shared wiring for integration tests: a full evaluation stack over
//! testkit collaborators.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use pricewatch::resilience::{BreakerConfig, BreakerRegistry, RetryPolicy};
use pricewatch::service::{AlertEvaluator, AlertService, BatchRunner, PriceGateway};
use pricewatch::testkit::{InMemoryAlertStore, RecordingNotifier, ScriptedPriceSource};

/// Breaker name the harness binds the gateway to.
pub const BREAKER: &str = "pricing_service";

pub struct Harness {
    pub source: Arc<ScriptedPriceSource>,
    pub store: Arc<InMemoryAlertStore>,
    pub notifier: Arc<RecordingNotifier>,
    pub registry: Arc<BreakerRegistry>,
    pub evaluator: Arc<AlertEvaluator>,
}

impl Harness {
    pub fn batch(&self) -> BatchRunner {
        BatchRunner::new(self.store.clone(), self.evaluator.clone())
    }

    pub fn alert_service(&self) -> AlertService {
        AlertService::new(self.store.clone(), self.evaluator.clone())
    }
}

/// Stack with a single-attempt retry and default breaker settings, so
/// tests that don't exercise the guards see one upstream call per fetch.
pub fn harness(source: ScriptedPriceSource, notifier: RecordingNotifier) -> Harness {
    harness_with(
        source,
        notifier,
        RetryPolicy::new(1, Duration::ZERO, 1.0),
        BreakerConfig::default(),
    )
}

/// Stack with explicit retry and breaker settings.
pub fn harness_with(
    source: ScriptedPriceSource,
    notifier: RecordingNotifier,
    retry: RetryPolicy,
    breaker: BreakerConfig,
) -> Harness {
    let source = Arc::new(source);
    let store = Arc::new(InMemoryAlertStore::new());
    let notifier = Arc::new(notifier);
    let registry = Arc::new(BreakerRegistry::new(breaker));

    let gateway = Arc::new(PriceGateway::new(
        source.clone(),
        registry.get_or_create(BREAKER),
        retry,
    ));
    let evaluator = Arc::new(AlertEvaluator::new(
        gateway,
        store.clone(),
        notifier.clone(),
    ));

    Harness {
        source,
        store,
        notifier,
        registry,
        evaluator,
    }
}
