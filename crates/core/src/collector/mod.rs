//! Query orchestration: symbols in, price samples out.
//!
//! A [`Collector`] is built per scrape from the request's symbol list. It
//! resolves every symbol through the shared [`QuoteCache`], times each
//! lookup, classifies the outcome and emits one [`Sample`] per symbol that
//! produced a usable price. A failing symbol is counted and logged, and never
//! keeps the other symbols from being processed.

mod query;

#[cfg(test)]
mod collector_tests;

pub use query::{parse_symbols, SYMBOLS_PARAM};

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::join_all;
use quotes_exporter_market_data::ErrorKind;
use tracing::{info, warn};

use crate::cache::QuoteCache;
use crate::errors::Result;
use crate::metrics::ExporterMetrics;

/// One price ready for emission.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub symbol: String,
    /// Display name; the symbol itself until richer metadata exists.
    pub name: String,
    pub price: f64,
}

/// Classification of a single per-symbol attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestOutcome {
    Success,
    ProviderError,
    InvalidData,
    ConfigurationMissing,
}

impl RequestOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

impl From<ErrorKind> for RequestOutcome {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::ConfigurationMissing => Self::ConfigurationMissing,
            ErrorKind::ProviderError => Self::ProviderError,
            ErrorKind::InvalidData => Self::InvalidData,
        }
    }
}

/// How one symbol went during a collect pass.
#[derive(Debug, Clone)]
pub struct SymbolReport {
    pub symbol: String,
    pub outcome: RequestOutcome,
    pub from_cache: bool,
    pub elapsed: Duration,
}

/// Everything a collect pass produced.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    pub samples: Vec<Sample>,
    /// One entry per requested symbol, in request order.
    pub reports: Vec<SymbolReport>,
}

impl Collection {
    pub fn failures(&self) -> usize {
        self.reports
            .iter()
            .filter(|report| !report.outcome.is_success())
            .count()
    }
}

/// Turns a fixed symbol list into price samples.
pub struct Collector {
    symbols: Vec<String>,
    cache: Arc<QuoteCache>,
    metrics: ExporterMetrics,
}

impl Collector {
    pub fn new(symbols: Vec<String>, cache: Arc<QuoteCache>, metrics: ExporterMetrics) -> Self {
        Self {
            symbols,
            cache,
            metrics,
        }
    }

    /// Build a collector from a scrape request's raw query string.
    ///
    /// Fails with [`CollectorError::MissingParameter`](crate::CollectorError::MissingParameter)
    /// when no `symbols` parameter is present.
    pub fn from_query(
        raw_query: Option<&str>,
        cache: Arc<QuoteCache>,
        metrics: ExporterMetrics,
    ) -> Result<Self> {
        let symbols = parse_symbols(raw_query)?;
        Ok(Self::new(symbols, cache, metrics))
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Resolve every symbol and return the samples that succeeded.
    pub async fn collect(&self) -> Vec<Sample> {
        self.collect_outcomes().await.samples
    }

    /// Resolve every symbol and return samples plus a per-symbol report.
    ///
    /// Symbols are looked up concurrently; the cache coalesces duplicates.
    /// The query counter is bumped once per pass, not per symbol.
    pub async fn collect_outcomes(&self) -> Collection {
        let lookups = self.symbols.iter().map(|symbol| self.resolve_one(symbol));
        let results = join_all(lookups).await;

        let mut collection = Collection {
            samples: Vec::with_capacity(results.len()),
            reports: Vec::with_capacity(results.len()),
        };
        for (report, sample) in results {
            collection.reports.push(report);
            collection.samples.extend(sample);
        }

        self.metrics.queries_total.inc();
        collection
    }

    async fn resolve_one(&self, symbol: &str) -> (SymbolReport, Option<Sample>) {
        let start = Instant::now();
        let resolution = self.cache.resolve(symbol).await;
        let elapsed = start.elapsed();
        self.metrics.query_duration.observe(elapsed.as_secs_f64());

        let cached = if resolution.from_cache { " (cached)" } else { "" };

        let (outcome, sample) = match resolution.result {
            Ok(price) if price.is_finite() => {
                info!("Retrieved {}{}, price: {}", symbol, cached, price);
                let sample = Sample {
                    symbol: symbol.to_string(),
                    name: symbol.to_string(),
                    price,
                };
                (RequestOutcome::Success, Some(sample))
            }
            Ok(price) => {
                self.metrics.failed_queries_total.inc();
                warn!("Invalid quote data for {}{}: {}", symbol, cached, price);
                (RequestOutcome::InvalidData, None)
            }
            Err(e) => {
                self.metrics.failed_queries_total.inc();
                let outcome = RequestOutcome::from(e.kind());
                warn!(
                    "Error looking up {}{} ({}): {}",
                    symbol,
                    cached,
                    e.kind(),
                    e
                );
                (outcome, None)
            }
        };

        let report = SymbolReport {
            symbol: symbol.to_string(),
            outcome,
            from_cache: resolution.from_cache,
            elapsed,
        };
        (report, sample)
    }
}
