use esgscope::{EsgScope, LookupOutcome};
use esgscope_mock::{CallLog, MockBehavior};

use crate::helpers::{bursa, code, not_found, t, yahoo};

#[tokio::test]
async fn batch_preserves_order_and_survives_failures() {
    let log = CallLog::new();
    let scope = EsgScope::builder()
        .with_country(code("MY"), bursa(&log))
        .with_fallback(yahoo(&log, not_found("esg")))
        .build()
        .unwrap();

    let reports = scope
        .resolve_many(&[
            (None, t("AAPL.US")),
            (Some(code("MY")), t("MAYBANK.KL")),
            (None, t("XXXX.ZZ")),
        ])
        .await;

    let tickers: Vec<&str> = reports.iter().map(|r| r.ticker.as_str()).collect();
    assert_eq!(tickers, vec!["AAPL.US", "MAYBANK.KL", "XXXX.ZZ"]);
    assert_eq!(reports[0].exchange, "Yahoo Finance");
    assert_eq!(reports[1].exchange, "Bursa Malaysia");
    assert_eq!(reports[2].exchange, "Unknown Exchange");

    assert!(matches!(reports[0].outcome, LookupOutcome::Unavailable(_)));
    assert_eq!(reports[1].company(), Some("Malayan Banking Berhad"));
    assert_eq!(
        reports[2].outcome.reason().as_deref(),
        Some("ESG data not found")
    );
}

#[tokio::test]
async fn empty_batch_is_empty() {
    let log = CallLog::new();
    let scope = EsgScope::builder()
        .with_fallback(yahoo(&log, MockBehavior::Empty))
        .build()
        .unwrap();
    assert!(scope.resolve_many(&[]).await.is_empty());
}
