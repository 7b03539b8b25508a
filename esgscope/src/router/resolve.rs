use esgscope_core::{CountryCode, EsgError, EsgReport, FetchStrategy, LookupOutcome, Ticker, detect};

use crate::EsgScope;
use crate::core::Stage;
use crate::router::util::{accept, exhausted, unimplemented};

impl EsgScope {
    /// Resolve ESG metrics for `ticker`.
    ///
    /// The primary provider is the one registered for `country`, or for the
    /// country of the ticker's exchange when `country` is `None`. Fallbacks
    /// follow in registration order. Each provider is called at most once and
    /// bounded by the per-provider timeout; failures, timeouts, and empty
    /// results advance the chain. The first populated result is returned.
    ///
    /// Never fails: exhaustion yields `Unavailable` with the reason
    /// `"ESG data not found"` and every attempt's error attached.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "esgscope::router::resolve",
            skip(self),
            fields(ticker = %ticker, country = ?country.map(CountryCode::as_str)),
        )
    )]
    pub async fn resolve(&self, country: Option<&CountryCode>, ticker: &Ticker) -> LookupOutcome {
        let stages = self.stages(country, ticker);
        match self.fetch_strategy {
            FetchStrategy::PriorityRace => self.resolve_race(&stages, ticker).await,
            _ => self.resolve_priority_with_fallback(&stages, ticker).await,
        }
    }

    async fn resolve_priority_with_fallback(
        &self,
        stages: &[Stage],
        ticker: &Ticker,
    ) -> LookupOutcome {
        let mut attempts: Vec<EsgError> = Vec::new();

        for stage in stages {
            let c = match stage {
                Stage::Missing(country) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(country = %country, "no provider registered for country");
                    attempts.push(EsgError::provider_unavailable(country.as_str()));
                    continue;
                }
                Stage::Call(c) => c,
            };
            let Some(p) = c.as_esg_provider() else {
                attempts.push(unimplemented(c.name()));
                continue;
            };
            let outcome =
                Self::provider_call_with_timeout(c.name(), self.provider_timeout, p.fetch(ticker))
                    .await;
            match accept(c.name(), outcome) {
                Ok(r) => {
                    #[cfg(feature = "tracing")]
                    tracing::info!(connector = c.name(), metrics = r.metrics.len(), "resolved");
                    return LookupOutcome::Found(r);
                }
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(connector = c.name(), error = %e, "stage failed");
                    attempts.push(e);
                }
            }
        }

        #[cfg(feature = "tracing")]
        tracing::warn!(attempts = attempts.len(), "fallback chain exhausted");
        exhausted(ticker, attempts)
    }

    async fn resolve_race(&self, stages: &[Stage], ticker: &Ticker) -> LookupOutcome {
        use futures::stream::{FuturesUnordered, StreamExt};

        let mut slots: Vec<Option<Result<esgscope_core::EsgResult, EsgError>>> =
            Vec::with_capacity(stages.len());
        let mut futs = FuturesUnordered::new();

        for (idx, stage) in stages.iter().enumerate() {
            match stage {
                Stage::Missing(country) => {
                    slots.push(Some(Err(EsgError::provider_unavailable(country.as_str()))));
                }
                Stage::Call(c) => match c.as_esg_provider() {
                    None => slots.push(Some(Err(unimplemented(c.name())))),
                    Some(p) => {
                        slots.push(None);
                        let name = c.name();
                        let timeout = self.provider_timeout;
                        futs.push(async move {
                            let out = Self::provider_call_with_timeout(
                                name,
                                timeout,
                                p.fetch(ticker),
                            )
                            .await;
                            (idx, accept(name, out))
                        });
                    }
                },
            }
        }

        loop {
            // Settle on the first success once every higher-priority stage has failed.
            let mut pending = false;
            for slot in &slots {
                match slot {
                    None => {
                        pending = true;
                        break;
                    }
                    Some(Ok(r)) => return LookupOutcome::Found(r.clone()),
                    Some(Err(_)) => {}
                }
            }
            if !pending {
                break;
            }
            match futs.next().await {
                Some((idx, res)) => slots[idx] = Some(res),
                None => break,
            }
        }

        let attempts = slots
            .into_iter()
            .filter_map(|s| s.and_then(Result::err))
            .collect();
        exhausted(ticker, attempts)
    }

    /// Resolve a batch of `(country, ticker)` requests one after another.
    ///
    /// Reports come back in input order; a failed ticker yields an
    /// `Unavailable` report and never aborts the batch.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "esgscope::router::resolve_many",
            skip(self, requests),
            fields(count = requests.len()),
        )
    )]
    pub async fn resolve_many(&self, requests: &[(Option<CountryCode>, Ticker)]) -> Vec<EsgReport> {
        let mut out = Vec::with_capacity(requests.len());
        for (country, ticker) in requests {
            let outcome = self.resolve(country.as_ref(), ticker).await;
            out.push(EsgReport {
                ticker: ticker.as_str().to_string(),
                exchange: detect(ticker).as_str().to_string(),
                outcome,
            });
        }
        out
    }
}
