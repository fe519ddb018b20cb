//! Self-observability metrics of the exporter.
//!
//! These describe how the exporter itself behaves (latency, volume, failures)
//! and are exposed next to the price gauges on every scrape.

use prometheus::{Histogram, HistogramOpts, IntCounter, Registry};

pub const QUERY_DURATION_SECONDS: &str = "quotes_exporter_query_duration_seconds";
pub const QUERIES_TOTAL: &str = "quotes_exporter_queries_total";
pub const FAILED_QUERIES_TOTAL: &str = "quotes_exporter_failed_queries_total";

/// Counters shared by every collector in the process.
///
/// Cloning is cheap and clones update the same underlying series, so one
/// instance can be registered in the process registry and in each per-scrape
/// registry at the same time.
#[derive(Clone)]
pub struct ExporterMetrics {
    pub query_duration: Histogram,
    pub queries_total: IntCounter,
    pub failed_queries_total: IntCounter,
}

impl ExporterMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        Ok(Self {
            query_duration: Histogram::with_opts(HistogramOpts::new(
                QUERY_DURATION_SECONDS,
                "Duration of queries to the upstream API",
            ))?,
            queries_total: IntCounter::new(QUERIES_TOTAL, "Count of completed queries")?,
            failed_queries_total: IntCounter::new(
                FAILED_QUERIES_TOTAL,
                "Count of failed queries",
            )?,
        })
    }

    /// Register all three series in `registry`.
    pub fn register(&self, registry: &Registry) -> Result<(), prometheus::Error> {
        registry.register(Box::new(self.query_duration.clone()))?;
        registry.register(Box::new(self.queries_total.clone()))?;
        registry.register(Box::new(self.failed_queries_total.clone()))?;
        Ok(())
    }
}
