//! Single-alert evaluation: trigger rule, audit trail, skip behavior.

mod support;

use rust_decimal_macros::dec;

use pricewatch::domain::NotificationOutcome;
use pricewatch::error::FetchError;
use pricewatch::service::Evaluation;
use pricewatch::testkit::{domain::alert, RecordingNotifier, ScriptedPriceSource};

use support::harness;

#[tokio::test]
async fn triggers_when_price_is_above_threshold() {
    let h = harness(
        ScriptedPriceSource::new().with_price("bitcoin", dec!(51000)),
        RecordingNotifier::new(),
    );
    let alert = alert("bitcoin", dec!(50000));

    let outcome = h.evaluator.evaluate(&alert).await.unwrap();
    assert_eq!(outcome, Evaluation::Triggered);

    let records = h.store.triggers();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].observed_price(), dec!(51000));
    assert_eq!(records[0].threshold_price(), dec!(50000));
    assert_eq!(records[0].notification(), NotificationOutcome::Delivered);

    let sent = h.notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].target, "user-1".into());
    assert_eq!(sent[0].title, "Price Alert Triggered!");
    assert_eq!(sent[0].body, "BITCOIN reached $51000");
    assert_eq!(sent[0].metadata.threshold_price, dec!(50000));
}

#[tokio::test]
async fn triggers_on_exact_threshold() {
    let h = harness(
        ScriptedPriceSource::new().with_price("bitcoin", dec!(50000)),
        RecordingNotifier::new(),
    );
    let outcome = h
        .evaluator
        .evaluate(&alert("bitcoin", dec!(50000)))
        .await
        .unwrap();
    assert_eq!(outcome, Evaluation::Triggered);
}

#[tokio::test]
async fn does_not_trigger_below_threshold() {
    let h = harness(
        ScriptedPriceSource::new().with_price("bitcoin", dec!(49999)),
        RecordingNotifier::new(),
    );
    let outcome = h
        .evaluator
        .evaluate(&alert("bitcoin", dec!(50000)))
        .await
        .unwrap();

    assert_eq!(outcome, Evaluation::NotMet);
    assert!(h.store.triggers().is_empty());
    assert!(h.notifier.sent().is_empty());
}

#[tokio::test]
async fn fetch_failure_yields_skipped_not_an_error() {
    let h = harness(
        ScriptedPriceSource::new()
            .with_results(vec![Err(FetchError::Connection("refused".into()))]),
        RecordingNotifier::new(),
    );
    let outcome = h
        .evaluator
        .evaluate(&alert("bitcoin", dec!(50000)))
        .await
        .unwrap();

    assert_eq!(outcome, Evaluation::Skipped);
    assert!(h.store.triggers().is_empty());
    assert!(h.notifier.sent().is_empty());
}

#[tokio::test]
async fn delivery_failure_still_completes_the_audit_trail() {
    let h = harness(
        ScriptedPriceSource::new().with_price("bitcoin", dec!(51000)),
        RecordingNotifier::new().with_outcomes(vec![false]),
    );
    let outcome = h
        .evaluator
        .evaluate(&alert("bitcoin", dec!(50000)))
        .await
        .unwrap();

    assert_eq!(outcome, Evaluation::Triggered);
    let records = h.store.triggers();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].notification(), NotificationOutcome::Failed);
}

#[tokio::test]
async fn repeated_evaluations_refire_while_price_stays_high() {
    let h = harness(
        ScriptedPriceSource::new().with_price("bitcoin", dec!(51000)),
        RecordingNotifier::new(),
    );
    let alert = alert("bitcoin", dec!(50000));

    for _ in 0..3 {
        let outcome = h.evaluator.evaluate(&alert).await.unwrap();
        assert_eq!(outcome, Evaluation::Triggered);
    }
    // Triggering never deactivates: three records, three notifications.
    assert_eq!(h.store.triggers().len(), 3);
    assert_eq!(h.notifier.sent().len(), 3);
}
