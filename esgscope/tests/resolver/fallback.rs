use std::time::Duration;

use esgscope::{EsgError, EsgScope, Exchange, MetricValue};
use esgscope_mock::{CallLog, MockBehavior, MockProvider, fixtures};

use crate::helpers::{alpha_vantage, bursa, code, not_found, t, yahoo};

#[tokio::test]
async fn us_ticker_without_data_exhausts_every_stage() {
    let log = CallLog::new();
    let scope = EsgScope::builder()
        .with_country(code("MY"), bursa(&log))
        .with_fallback(bursa(&log))
        .with_fallback(yahoo(&log, not_found("esg for AAPL.US")))
        .with_fallback(alpha_vantage(
            &log,
            MockBehavior::Fail(EsgError::connector("alpha-vantage", "rate limited")),
        ))
        .build()
        .unwrap();

    let out = scope.resolve(None, &t("AAPL.US")).await;
    assert!(!out.is_found());
    assert_eq!(out.reason().as_deref(), Some("ESG data not found"));
    assert_eq!(log.names().await, vec!["yahoo-finance", "alpha-vantage"]);

    match out.error() {
        Some(EsgError::ExhaustedFallback { ticker, attempts }) => {
            assert_eq!(ticker, "AAPL.US");
            assert!(matches!(attempts[0], EsgError::NotFound { .. }));
            assert!(matches!(attempts[1], EsgError::Connector { .. }));
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn primary_failure_falls_through_to_next_stage() {
    let log = CallLog::new();
    let lse = MockProvider::new("lse")
        .exchanges(&[Exchange::London])
        .behavior(MockBehavior::Fail(EsgError::connector("lse", "HTTP 503")))
        .log_to(&log)
        .shared();
    let scope = EsgScope::builder()
        .with_country(code("GB"), lse.clone())
        .with_fallback(lse)
        .with_fallback(yahoo(
            &log,
            MockBehavior::Return(fixtures::yahoo_scores("RIO.L")),
        ))
        .build()
        .unwrap();

    let out = scope.resolve(Some(&code("GB")), &t("RIO.L")).await;
    let r = out.result().expect("yahoo answers");
    assert_eq!(r.metrics[0].source, "Yahoo Finance");
    assert_eq!(r.metric("Social").map(|m| m.value.clone()), Some(MetricValue::Number(7.9)));
    assert_eq!(log.names().await, vec!["lse", "yahoo-finance"]);
}

#[tokio::test]
async fn empty_result_never_counts_as_success() {
    let log = CallLog::new();
    let lse = MockProvider::new("lse")
        .exchanges(&[Exchange::London])
        .behavior(MockBehavior::Empty)
        .log_to(&log)
        .shared();
    let scope = EsgScope::builder()
        .with_country(code("GB"), lse)
        .with_fallback(yahoo(&log, MockBehavior::Empty))
        .build()
        .unwrap();

    let out = scope.resolve(None, &t("RIO.L")).await;
    assert_eq!(out.reason().as_deref(), Some("ESG data not found"));
    let attempts = out.error().cloned().unwrap().flatten();
    assert_eq!(attempts.len(), 2);
    assert!(attempts.iter().all(|e| matches!(e, EsgError::Data(_))));
}

#[tokio::test]
async fn malformed_page_keeps_data_classification() {
    let lse = MockProvider::new("lse")
        .exchanges(&[Exchange::London])
        .behavior(MockBehavior::Fail(EsgError::Data(
            "lse: missing div.esg-rating".into(),
        )))
        .shared();
    let scope = EsgScope::builder()
        .with_country(code("GB"), lse)
        .build()
        .unwrap();

    let out = scope.resolve(None, &t("RIO.L")).await;
    let attempts = out.error().cloned().unwrap().flatten();
    assert_eq!(
        attempts,
        vec![EsgError::Data("lse: missing div.esg-rating".into())]
    );
}

#[tokio::test(start_paused = true)]
async fn timeout_is_not_fatal() {
    let log = CallLog::new();
    let stuck = MockProvider::new("bursa-malaysia")
        .exchanges(&[Exchange::BursaMalaysia])
        .behavior(MockBehavior::Hang)
        .log_to(&log)
        .shared();
    let scope = EsgScope::builder()
        .with_country(code("MY"), stuck)
        .with_fallback(yahoo(
            &log,
            MockBehavior::Return(fixtures::yahoo_scores("MAYBANK.KL")),
        ))
        .provider_timeout(Duration::from_millis(50))
        .build()
        .unwrap();

    let out = scope.resolve(None, &t("MAYBANK.KL")).await;
    assert!(out.is_found());
    assert_eq!(log.names().await, vec!["bursa-malaysia", "yahoo-finance"]);
}

#[tokio::test(start_paused = true)]
async fn all_timeouts_still_exhaust_with_stable_reason() {
    let log = CallLog::new();
    let scope = EsgScope::builder()
        .with_fallback(yahoo(&log, MockBehavior::Hang))
        .with_fallback(alpha_vantage(&log, MockBehavior::Hang))
        .provider_timeout(Duration::from_millis(20))
        .build()
        .unwrap();

    let out = scope.resolve(None, &t("XXXX.ZZ")).await;
    assert_eq!(out.reason().as_deref(), Some("ESG data not found"));
    let attempts = out.error().cloned().unwrap().flatten();
    assert!(
        attempts
            .iter()
            .all(|e| matches!(e, EsgError::ProviderTimeout { .. }))
    );
    assert!(out.error().unwrap().is_actionable());
}

#[tokio::test]
async fn each_provider_is_attempted_at_most_once() {
    let log = CallLog::new();
    let y = yahoo(&log, not_found("esg"));
    let scope = EsgScope::builder()
        .with_country(code("US"), y.clone())
        .with_fallback(y.clone())
        .with_fallback(y.clone())
        .build()
        .unwrap();

    let out = scope.resolve(None, &t("AAPL.US")).await;
    assert!(!out.is_found());
    assert_eq!(y.calls(), 1);
}

#[tokio::test]
async fn no_stage_at_all_still_reports_not_found() {
    let log = CallLog::new();
    let scope = EsgScope::builder()
        .with_country(code("MY"), bursa(&log))
        .build()
        .unwrap();

    let out = scope.resolve(None, &t("XXXX.ZZ")).await;
    assert_eq!(out.reason().as_deref(), Some("ESG data not found"));
    assert!(log.names().await.is_empty());
}

#[tokio::test]
async fn explicit_country_gap_is_recorded_as_unavailable() {
    let log = CallLog::new();
    let scope = EsgScope::builder()
        .with_fallback(yahoo(&log, not_found("esg")))
        .build()
        .unwrap();

    let out = scope.resolve(Some(&code("IN")), &t("TCS.NS")).await;
    match out.error() {
        Some(EsgError::ExhaustedFallback { attempts, .. }) => {
            assert!(matches!(
                &attempts[0],
                EsgError::ProviderUnavailable { country } if country == "IN"
            ));
            assert!(!out.error().unwrap().is_actionable());
        }
        other => panic!("unexpected: {other:?}"),
    }
}
