use esgscope::{EsgScope, Exchange, LookupOutcome};
use esgscope_mock::{CallLog, MockBehavior, MockProvider, fixtures};
use proptest::prelude::*;

use crate::helpers::{code, t};

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Whatever subset of stages succeeds, the first successful stage in chain
    /// order answers, and nothing after it is called.
    #[test]
    fn first_success_in_chain_order_wins(outcomes in proptest::collection::vec(any::<bool>(), 1..5)) {
        const NAMES: [&str; 5] = ["p0", "p1", "p2", "p3", "p4"];
        let log = CallLog::new();
        let mut builder = EsgScope::builder();
        for (i, ok) in outcomes.iter().enumerate() {
            let behavior = if *ok {
                MockBehavior::Return(fixtures::yahoo_scores(NAMES[i]))
            } else {
                MockBehavior::Empty
            };
            let p = MockProvider::new(NAMES[i])
                .all_exchanges()
                .behavior(behavior)
                .log_to(&log)
                .shared();
            builder = if i == 0 {
                builder.with_country(code("GB"), p)
            } else {
                builder.with_fallback(p)
            };
        }
        let scope = builder.build().unwrap();
        let rt = runtime();

        let out = rt.block_on(scope.resolve(None, &t("RIO.L")));
        let called = rt.block_on(log.names());
        match outcomes.iter().position(|ok| *ok) {
            Some(winner) => {
                let r = out.result().unwrap();
                prop_assert_eq!(r.company.as_str(), NAMES[winner]);
                prop_assert_eq!(called, NAMES[..=winner].to_vec());
            }
            None => {
                prop_assert!(matches!(out, LookupOutcome::Unavailable(_)));
                let reason = out.reason();
                prop_assert_eq!(reason.as_deref(), Some("ESG data not found"));
                prop_assert_eq!(called.len(), outcomes.len());
            }
        }
    }

    #[test]
    fn resolution_is_deterministic(repeat in 1usize..4) {
        let log = CallLog::new();
        let scope = EsgScope::builder()
            .with_country(
                code("GB"),
                MockProvider::new("lse")
                    .exchanges(&[Exchange::London])
                    .behavior(MockBehavior::Return(fixtures::rio_tinto()))
                    .log_to(&log)
                    .shared(),
            )
            .build()
            .unwrap();
        let rt = runtime();
        let first = rt.block_on(scope.resolve(None, &t("RIO.L")));
        for _ in 0..repeat {
            let again = rt.block_on(scope.resolve(None, &t("RIO.L")));
            prop_assert_eq!(&again, &first);
        }
    }
}
