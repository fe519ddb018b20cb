//! Quotes Exporter Market Data Crate
//!
//! This crate provides provider-agnostic price lookups for the quotes
//! exporter.
//!
//! # Overview
//!
//! ```text
//! +------------------+     +------------------+
//! |    Collector     | --> |  QuoteProvider   |  (dyn, one per process)
//! +------------------+     +------------------+
//!                                  |
//!                      +-----------+-----------+
//!                      v                       v
//!              +---------------+      +--------------------+
//!              | YahooProvider |      | TwelveDataProvider |
//!              +---------------+      +--------------------+
//! ```
//!
//! # Core Types
//!
//! - [`QuoteProvider`] - `quote(symbol) -> Result<f64, MarketDataError>`
//! - [`ProviderKind`] - Which provider a process uses
//! - [`MarketDataError`] - Failures, classified by [`ErrorKind`]

pub mod errors;
pub mod provider;

pub use errors::{ErrorKind, MarketDataError};

// Re-export provider types
pub use provider::twelvedata::TwelveDataProvider;
pub use provider::yahoo::YahooProvider;
pub use provider::{build_provider, ProviderKind, QuoteProvider, UnknownProvider};
