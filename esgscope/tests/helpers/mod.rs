use std::sync::Arc;

use esgscope::{CountryCode, EsgError, Exchange, Ticker};
use esgscope_mock::{CallLog, MockBehavior, MockProvider, fixtures};

pub fn t(s: &str) -> Ticker {
    Ticker::new(s).unwrap()
}

pub fn code(s: &str) -> CountryCode {
    CountryCode::new(s).unwrap()
}

/// Bursa mock that knows MAYBANK.KL and serves Malaysian listings.
pub fn bursa(log: &CallLog) -> Arc<MockProvider> {
    MockProvider::new("bursa-malaysia")
        .vendor("Bursa Malaysia")
        .exchanges(&[Exchange::BursaMalaysia])
        .for_ticker("MAYBANK.KL", MockBehavior::Return(fixtures::maybank()))
        .log_to(log)
        .shared()
}

/// Yahoo mock that serves every exchange but has no data by default.
pub fn yahoo(log: &CallLog, behavior: MockBehavior) -> Arc<MockProvider> {
    MockProvider::new("yahoo-finance")
        .vendor("Yahoo Finance")
        .all_exchanges()
        .behavior(behavior)
        .log_to(log)
        .shared()
}

/// Alpha Vantage mock that serves every exchange.
pub fn alpha_vantage(log: &CallLog, behavior: MockBehavior) -> Arc<MockProvider> {
    MockProvider::new("alpha-vantage")
        .vendor("Alpha Vantage")
        .all_exchanges()
        .behavior(behavior)
        .log_to(log)
        .shared()
}

pub fn not_found(what: &str) -> MockBehavior {
    MockBehavior::Fail(EsgError::not_found(what))
}
