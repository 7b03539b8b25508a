use std::time::Duration;

use esgscope::{EsgConfig, EsgError, EsgScope, Exchange, FetchStrategy};
use esgscope_mock::{CallLog, MockBehavior, MockProvider, fixtures};

use crate::helpers::{alpha_vantage, code, not_found, t, yahoo};

#[tokio::test(start_paused = true)]
async fn race_prefers_highest_priority_success_over_faster_one() {
    let log = CallLog::new();
    let slow_primary = MockProvider::new("lse")
        .exchanges(&[Exchange::London])
        .delay(Duration::from_millis(100))
        .behavior(MockBehavior::Return(fixtures::rio_tinto()))
        .log_to(&log)
        .shared();
    let scope = EsgScope::builder()
        .with_country(code("GB"), slow_primary)
        .with_fallback(yahoo(
            &log,
            MockBehavior::Return(fixtures::yahoo_scores("RIO.L")),
        ))
        .fetch_strategy(FetchStrategy::PriorityRace)
        .build()
        .unwrap();

    let out = scope.resolve(None, &t("RIO.L")).await;
    let r = out.result().expect("found");
    assert_eq!(r.company, "Rio Tinto");
    assert_eq!(log.names().await.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn race_returns_fallback_once_primary_fails() {
    let log = CallLog::new();
    let failing = MockProvider::new("lse")
        .exchanges(&[Exchange::London])
        .delay(Duration::from_millis(30))
        .behavior(MockBehavior::Fail(EsgError::connector("lse", "down")))
        .shared();
    let scope = EsgScope::builder()
        .with_country(code("GB"), failing)
        .with_fallback(yahoo(&log, MockBehavior::Empty))
        .with_fallback(alpha_vantage(
            &log,
            MockBehavior::Return(fixtures::yahoo_scores("RIO.L")),
        ))
        .fetch_strategy(FetchStrategy::PriorityRace)
        .build()
        .unwrap();

    let out = scope.resolve(None, &t("RIO.L")).await;
    assert!(out.is_found());
}

#[tokio::test(start_paused = true)]
async fn race_exhaustion_matches_sequential_reason() {
    let log = CallLog::new();
    let scope = EsgScope::builder()
        .with_fallback(yahoo(&log, not_found("esg")))
        .with_fallback(alpha_vantage(&log, MockBehavior::Hang))
        .provider_timeout(Duration::from_millis(10))
        .fetch_strategy(FetchStrategy::PriorityRace)
        .build()
        .unwrap();

    let out = scope.resolve(None, &t("AAPL.US")).await;
    assert_eq!(out.reason().as_deref(), Some("ESG data not found"));
    match out.error() {
        Some(EsgError::ExhaustedFallback { attempts, .. }) => {
            assert!(matches!(attempts[0], EsgError::NotFound { .. }));
            assert!(matches!(attempts[1], EsgError::ProviderTimeout { .. }));
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn config_sets_timeout_and_strategy() {
    let log = CallLog::new();
    let cfg = EsgConfig::from_yaml_str(
        "provider_timeout_ms: 1500\nfetch_strategy: priority_race\n",
    )
    .unwrap();
    let scope = EsgScope::builder()
        .with_fallback(yahoo(&log, not_found("esg")))
        .config(&cfg)
        .build()
        .unwrap();
    assert_eq!(scope.provider_timeout(), Duration::from_millis(1500));
    assert_eq!(scope.fetch_strategy(), FetchStrategy::PriorityRace);
}
