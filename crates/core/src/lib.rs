//! Quotes Exporter Core - query orchestration and caching.
//!
//! This crate turns a list of symbols into price samples for a pull-based
//! monitoring system while keeping the upstream provider's load bounded.
//! It knows nothing about HTTP or text exposition; the server crate owns
//! those.
//!
//! - [`cache::QuoteCache`]: per-symbol memoization of provider calls
//! - [`collector::Collector`]: per-scrape orchestration and outcome accounting
//! - [`metrics::ExporterMetrics`]: self-observability series

pub mod cache;
pub mod collector;
pub mod errors;
pub mod metrics;

#[cfg(test)]
mod test_support;

pub use cache::{CacheConfig, QuoteCache, QuoteResult, Resolution};
pub use collector::{Collection, Collector, RequestOutcome, Sample, SymbolReport};
pub use metrics::ExporterMetrics;

// Re-export error types
pub use errors::CollectorError;
pub use errors::Result;
