//! Alert lifecycle: creation validation, immediate evaluation,
//! deactivation semantics.

mod support;

use rust_decimal_macros::dec;

use pricewatch::domain::{AlertId, CoinId, DomainError, UserId};
use pricewatch::error::Error;
use pricewatch::testkit::{RecordingNotifier, ScriptedPriceSource};

use support::harness;

fn user() -> UserId {
    UserId::new("user-1")
}

#[tokio::test]
async fn create_rejects_non_positive_threshold() {
    let h = harness(ScriptedPriceSource::new(), RecordingNotifier::new());
    let service = h.alert_service();

    let err = service
        .create(&user(), CoinId::new("bitcoin"), dec!(0))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Domain(DomainError::NonPositiveThreshold { .. })
    ));
    // Nothing was persisted and nothing was evaluated.
    assert!(h.store.alerts().is_empty());
    assert_eq!(h.source.calls(), 0);
}

#[tokio::test]
async fn create_evaluates_immediately_when_price_already_crossed() {
    let h = harness(
        ScriptedPriceSource::new().with_price("bitcoin", dec!(51000)),
        RecordingNotifier::new(),
    );
    let service = h.alert_service();

    let alert = service
        .create(&user(), CoinId::new("bitcoin"), dec!(50000))
        .await
        .unwrap();

    assert!(alert.is_active());
    let records = h.store.triggers();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].alert_id(), alert.id());
    assert_eq!(h.notifier.sent().len(), 1);
}

#[tokio::test]
async fn create_survives_a_failed_immediate_evaluation() {
    let h = harness(
        ScriptedPriceSource::new().with_price("bitcoin", dec!(51000)),
        RecordingNotifier::new(),
    );
    let service = h.alert_service();

    // Price is already past the threshold, but the audit append fails;
    // the creation itself must still succeed.
    h.store.fail_all_appends(true);

    let alert = service
        .create(&user(), CoinId::new("bitcoin"), dec!(50000))
        .await
        .unwrap();
    assert!(alert.is_active());
    assert!(h.store.triggers().is_empty());
}

#[tokio::test]
async fn create_survives_an_unavailable_price_feed() {
    let h = harness(
        ScriptedPriceSource::new()
            .with_results(vec![Err(pricewatch::error::FetchError::Timeout)]),
        RecordingNotifier::new(),
    );
    let service = h.alert_service();

    let alert = service
        .create(&user(), CoinId::new("bitcoin"), dec!(50000))
        .await
        .unwrap();
    assert!(alert.is_active());
    assert!(h.notifier.sent().is_empty());
}

#[tokio::test]
async fn create_normalizes_the_coin_id() {
    let h = harness(ScriptedPriceSource::new(), RecordingNotifier::new());
    let service = h.alert_service();

    let alert = service
        .create(&user(), CoinId::new("  Bitcoin "), dec!(50000))
        .await
        .unwrap();
    assert_eq!(alert.coin_id().as_str(), "bitcoin");
}

#[tokio::test]
async fn list_returns_only_the_users_active_alerts() {
    let h = harness(ScriptedPriceSource::new(), RecordingNotifier::new());
    let service = h.alert_service();

    let mine = service
        .create(&user(), CoinId::new("bitcoin"), dec!(1))
        .await
        .unwrap();
    service
        .create(&UserId::new("user-2"), CoinId::new("bitcoin"), dec!(1))
        .await
        .unwrap();
    let retired = service
        .create(&user(), CoinId::new("ethereum"), dec!(1))
        .await
        .unwrap();
    service.deactivate(retired.id()).await.unwrap();

    let listed = service.list(&user()).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id(), mine.id());
}

#[tokio::test]
async fn deactivate_is_idempotent_and_never_errors() {
    let h = harness(ScriptedPriceSource::new(), RecordingNotifier::new());
    let service = h.alert_service();

    let alert = service
        .create(&user(), CoinId::new("bitcoin"), dec!(1))
        .await
        .unwrap();

    assert!(service.deactivate(alert.id()).await.unwrap());
    // Already deactivated: defined non-error result.
    assert!(!service.deactivate(alert.id()).await.unwrap());
    // Unknown id behaves the same.
    assert!(!service.deactivate(&AlertId::new("missing")).await.unwrap());
}
