//! Yahoo Finance access behind a trait, so tests can inject canned scores.

use std::sync::Arc;

use async_trait::async_trait;
use esgscope_core::EsgError;
use yfinance_rs as yf;

use crate::http::DEFAULT_USER_AGENT;

/// Pillar scores as reported by Yahoo's sustainability module.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct YahooScores {
    /// Environmental risk score.
    pub environmental: Option<f64>,
    /// Social risk score.
    pub social: Option<f64>,
    /// Governance risk score.
    pub governance: Option<f64>,
}

/// ESG abstraction for sustainability scores.
#[async_trait]
pub trait YfEsg: Send + Sync {
    /// Fetch ESG scores for `symbol`.
    async fn sustainability(&self, symbol: &str) -> Result<YahooScores, EsgError>;
}

/// Real adapter backed by a single `YfClient` instance.
#[derive(Clone)]
pub struct RealAdapter {
    client: yf::YfClient,
}

impl RealAdapter {
    /// Build a `YfClient` with a cookie-enabled HTTP client and a browser user agent.
    ///
    /// # Errors
    /// Returns `Config` if the HTTP or Yahoo client cannot be built.
    pub fn try_new(timeout: std::time::Duration) -> Result<Self, EsgError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .build()
            .map_err(|e| EsgError::Config(format!("http client for yahoo: {e}")))?;
        let client = yf::YfClient::builder()
            .custom_client(http)
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .map_err(|e| EsgError::Config(format!("yahoo client: {e}")))?;
        Ok(Self { client })
    }

    /// Wrap an existing `YfClient`.
    #[must_use]
    pub const fn new(client: yf::YfClient) -> Self {
        Self { client }
    }
}

fn map_yf_err(e: &yf::YfError, context: &str) -> EsgError {
    match e {
        yf::YfError::NotFound { .. } => EsgError::not_found(context.to_string()),
        yf::YfError::RateLimited { .. } => {
            EsgError::connector("yahoo-finance", format!("rate limit: {context}"))
        }
        yf::YfError::ServerError { status, .. } => {
            EsgError::connector("yahoo-finance", format!("server error {status}: {context}"))
        }
        yf::YfError::Status { status, .. } => {
            EsgError::connector("yahoo-finance", format!("status {status}: {context}"))
        }
        other => EsgError::connector("yahoo-finance", other.to_string()),
    }
}

#[async_trait]
impl YfEsg for RealAdapter {
    async fn sustainability(&self, symbol: &str) -> Result<YahooScores, EsgError> {
        let eb = yf::esg::EsgBuilder::new(&self.client, symbol);
        let summary = eb
            .fetch()
            .await
            .map_err(|e| map_yf_err(&e, &format!("sustainability for {symbol}")))?;
        let scores = summary
            .scores
            .ok_or_else(|| EsgError::Data(format!("missing ESG scores for {symbol}")))?;
        Ok(YahooScores {
            environmental: scores.environmental,
            social: scores.social,
            governance: scores.governance,
        })
    }
}

impl dyn YfEsg {
    /// Build a `YfEsg` from a closure.
    pub fn from_fn<F>(f: F) -> Arc<dyn YfEsg>
    where
        F: Send + Sync + 'static + Fn(String) -> Result<YahooScores, EsgError>,
    {
        struct FnEsg<F>(F);
        #[async_trait]
        impl<F> YfEsg for FnEsg<F>
        where
            F: Send + Sync + 'static + Fn(String) -> Result<YahooScores, EsgError>,
        {
            async fn sustainability(&self, symbol: &str) -> Result<YahooScores, EsgError> {
                (self.0)(symbol.to_string())
            }
        }
        Arc::new(FnEsg(f))
    }
}
