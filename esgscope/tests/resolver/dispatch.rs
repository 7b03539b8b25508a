use std::sync::Arc;

use esgscope::{EsgError, EsgScope, LookupOutcome};
use esgscope_mock::{CallLog, MockBehavior, MockProvider, fixtures};

use crate::helpers::{alpha_vantage, bursa, code, not_found, t, yahoo};

#[tokio::test]
async fn explicit_country_uses_registered_provider() {
    let log = CallLog::new();
    let bursa = bursa(&log);
    let scope = EsgScope::builder()
        .with_country(code("MY"), bursa.clone())
        .with_fallback(bursa.clone())
        .with_fallback(yahoo(&log, not_found("esg")))
        .build()
        .unwrap();

    let out = scope.resolve(Some(&code("MY")), &t("MAYBANK.KL")).await;
    let r = out.result().expect("found");
    assert_eq!(r.metrics.len(), 2);
    assert_eq!(r.company, "Malayan Banking Berhad");
    assert_eq!(log.names().await, vec!["bursa-malaysia"]);
    assert_eq!(bursa.calls(), 1);
}

#[tokio::test]
async fn exchange_country_picks_primary_when_country_omitted() {
    let log = CallLog::new();
    let bursa = bursa(&log);
    let scope = EsgScope::builder()
        .with_country(code("MY"), bursa.clone())
        .with_fallback(yahoo(&log, not_found("esg")))
        .build()
        .unwrap();

    let out = scope.resolve(None, &t("maybank.kl")).await;
    assert!(out.is_found());
    assert_eq!(log.names().await, vec!["bursa-malaysia"]);
}

#[tokio::test]
async fn unregistered_country_goes_straight_to_fallbacks() {
    let log = CallLog::new();
    let scope = EsgScope::builder()
        .with_country(code("MY"), bursa(&log))
        .with_fallback(yahoo(
            &log,
            MockBehavior::Return(fixtures::yahoo_scores("D05.SI")),
        ))
        .build()
        .unwrap();

    let out = scope.resolve(Some(&code("SG")), &t("D05.SI")).await;
    assert!(out.is_found());
    assert_eq!(log.names().await, vec!["yahoo-finance"]);
}

#[tokio::test]
async fn registered_but_unimplemented_provider_is_skipped() {
    let log = CallLog::new();
    let sgx = MockProvider::new("sgx").unimplemented().log_to(&log).shared();
    let scope = EsgScope::builder()
        .with_country(code("SG"), sgx.clone())
        .with_fallback(yahoo(&log, not_found("esg")))
        .build()
        .unwrap();

    let out = scope.resolve(Some(&code("SG")), &t("D05.SI")).await;
    assert_eq!(out.reason().as_deref(), Some("ESG data not found"));
    assert_eq!(sgx.calls(), 0);
    match out.error() {
        Some(EsgError::ExhaustedFallback { attempts, .. }) => {
            assert_eq!(attempts.len(), 2);
            assert!(matches!(&attempts[0], EsgError::Connector { connector, .. } if connector == "sgx"));
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn plan_lists_primary_then_supporting_fallbacks() {
    let log = CallLog::new();
    let bursa = bursa(&log);
    let lse = MockProvider::new("lse")
        .exchanges(&[esgscope::Exchange::London])
        .shared();
    let scope = EsgScope::builder()
        .with_country(code("MY"), bursa.clone())
        .with_country(code("GB"), lse.clone())
        .with_fallback(bursa)
        .with_fallback(lse)
        .with_fallback(yahoo(&log, not_found("esg")))
        .with_fallback(alpha_vantage(&log, not_found("esg")))
        .build()
        .unwrap();

    let keys = |c: Option<&str>, tk: &str| -> Vec<&'static str> {
        scope
            .plan(c.map(code).as_ref(), &t(tk))
            .into_iter()
            .map(|k| k.as_str())
            .collect()
    };
    assert_eq!(
        keys(None, "RIO.L"),
        vec!["lse", "yahoo-finance", "alpha-vantage"]
    );
    assert_eq!(
        keys(Some("MY"), "RIO.L"),
        vec!["bursa-malaysia", "lse", "yahoo-finance", "alpha-vantage"]
    );
    assert_eq!(
        keys(None, "XXXX.ZZ"),
        vec!["yahoo-finance", "alpha-vantage"]
    );
}

#[tokio::test]
async fn builder_rejects_duplicate_country_and_empty_setup() {
    let log = CallLog::new();
    let err = EsgScope::builder()
        .with_country(code("MY"), bursa(&log))
        .with_country(code("my"), bursa(&log))
        .build()
        .err()
        .expect("duplicate");
    assert!(matches!(err, EsgError::InvalidArg(_)));

    assert!(EsgScope::builder().build().is_err());

    let zero = EsgScope::builder()
        .with_fallback(yahoo(&log, not_found("esg")))
        .provider_timeout(std::time::Duration::ZERO)
        .build();
    assert!(zero.is_err());
}

#[tokio::test]
async fn registry_from_catalog_feeds_the_builder() {
    let log = CallLog::new();
    let bursa = bursa(&log);
    let countries = vec![code("MY"), code("SG")];
    let registry = esgscope::ProviderRegistry::from_catalog(&countries, |c| {
        (c.as_str() == "MY").then(|| Arc::clone(&bursa) as Arc<dyn esgscope::EsgConnector>)
    });
    let scope = EsgScope::builder().with_registry(registry).build().unwrap();
    assert_eq!(scope.registry().len(), 1);

    let out = scope.resolve(None, &t("MAYBANK.KL")).await;
    assert!(matches!(out, LookupOutcome::Found(_)));
}
