//! Scriptable mock connector for exercising the resolver without network access.
//!
//! A [`MockProvider`] answers every `fetch` according to a [`MockBehavior`],
//! optionally overridden per ticker, and records each call so tests can
//! assert on attempt order and counts.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use esgscope_core::connector::{EsgConnector, EsgProvider};
use esgscope_core::{EsgError, EsgResult, Exchange, LookupOutcome, Ticker};

pub mod fixtures;

/// Instruction for how `fetch` should behave.
#[derive(Clone, Debug)]
pub enum MockBehavior {
    /// Return the provided result immediately.
    Return(EsgResult),
    /// Fail immediately with the provided error.
    Fail(EsgError),
    /// Return a result for the ticker with no metrics (a malformed page).
    Empty,
    /// Hang indefinitely (simulate a stalled upstream).
    Hang,
}

/// Shared, ordered record of `(connector, ticker)` calls across several mocks.
#[derive(Clone, Default, Debug)]
pub struct CallLog(Arc<Mutex<Vec<(&'static str, String)>>>);

impl CallLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    async fn record(&self, name: &'static str, ticker: &Ticker) {
        self.0.lock().await.push((name, ticker.as_str().to_string()));
    }

    /// Connector names in call order.
    pub async fn names(&self) -> Vec<&'static str> {
        self.0.lock().await.iter().map(|(n, _)| *n).collect()
    }

    /// Full `(connector, ticker)` entries in call order.
    pub async fn entries(&self) -> Vec<(&'static str, String)> {
        self.0.lock().await.clone()
    }
}

/// Mock ESG connector driven by scripted behaviors.
pub struct MockProvider {
    name: &'static str,
    vendor: &'static str,
    exchanges: Option<Vec<Exchange>>,
    default: MockBehavior,
    per_ticker: HashMap<String, MockBehavior>,
    delay: Option<Duration>,
    implemented: bool,
    calls: AtomicUsize,
    log: Option<CallLog>,
}

impl MockProvider {
    /// New mock that fails with `NotFound` for every ticker and supports no
    /// exchanges as a fallback.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            vendor: "Mock",
            exchanges: Some(Vec::new()),
            default: MockBehavior::Fail(EsgError::not_found(format!("esg via {name}"))),
            per_ticker: HashMap::new(),
            delay: None,
            implemented: true,
            calls: AtomicUsize::new(0),
            log: None,
        }
    }

    /// Override the vendor string.
    #[must_use]
    pub const fn vendor(mut self, vendor: &'static str) -> Self {
        self.vendor = vendor;
        self
    }

    /// Serve only the listed exchanges when used as a fallback.
    #[must_use]
    pub fn exchanges(mut self, exchanges: &[Exchange]) -> Self {
        self.exchanges = Some(exchanges.to_vec());
        self
    }

    /// Serve every exchange, including unknown ones.
    #[must_use]
    pub fn all_exchanges(mut self) -> Self {
        self.exchanges = None;
        self
    }

    /// Default behavior for tickers without a specific rule.
    #[must_use]
    pub fn behavior(mut self, behavior: MockBehavior) -> Self {
        self.default = behavior;
        self
    }

    /// Behavior for one ticker (matched case-insensitively).
    #[must_use]
    pub fn for_ticker(mut self, ticker: &str, behavior: MockBehavior) -> Self {
        self.per_ticker.insert(ticker.to_ascii_uppercase(), behavior);
        self
    }

    /// Sleep before answering.
    #[must_use]
    pub const fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Register without an ESG capability, like a market that is listed but not built yet.
    #[must_use]
    pub const fn unimplemented(mut self) -> Self {
        self.implemented = false;
        self
    }

    /// Record calls into a shared log.
    #[must_use]
    pub fn log_to(mut self, log: &CallLog) -> Self {
        self.log = Some(log.clone());
        self
    }

    /// Wrap into an `Arc` for registration.
    #[must_use]
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Number of `fetch` calls observed so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EsgProvider for MockProvider {
    async fn fetch(&self, ticker: &Ticker) -> LookupOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(log) = &self.log {
            log.record(self.name, ticker).await;
        }
        if let Some(d) = self.delay {
            tokio::time::sleep(d).await;
        }
        let behavior = self
            .per_ticker
            .get(&ticker.upper())
            .unwrap_or(&self.default)
            .clone();
        match behavior {
            MockBehavior::Return(r) => LookupOutcome::Found(r),
            MockBehavior::Fail(e) => LookupOutcome::Unavailable(e),
            MockBehavior::Empty => LookupOutcome::Found(EsgResult::new(ticker.as_str(), vec![])),
            MockBehavior::Hang => std::future::pending().await,
        }
    }
}

impl EsgConnector for MockProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        self.vendor
    }

    fn supports_exchange(&self, exchange: Exchange) -> bool {
        self.exchanges
            .as_ref()
            .is_none_or(|list| list.contains(&exchange))
    }

    fn as_esg_provider(&self) -> Option<&dyn EsgProvider> {
        if self.implemented {
            Some(self as &dyn EsgProvider)
        } else {
            None
        }
    }
}
