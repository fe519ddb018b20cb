//! Core error types for the quotes exporter.
//!
//! Per-symbol lookup failures are not errors at this level: they are
//! [`MarketDataError`](quotes_exporter_market_data::MarketDataError)s caught
//! inside the collector. Only problems that prevent a collector from being
//! built at all end up here.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, CollectorError>;

/// Errors raised while building a collector from a scrape request.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CollectorError {
    /// The scrape request carries no `symbols` parameter at all.
    #[error("missing symbols in query")]
    MissingParameter,

    /// The query string could not be decoded.
    #[error("invalid query string: {0}")]
    InvalidQuery(String),
}
