//! Quote provider trait definition.
//!
//! This module defines the `QuoteProvider` trait that every upstream
//! price source implements.

use async_trait::async_trait;

use crate::errors::MarketDataError;

/// Trait for quote providers.
///
/// Implement this trait to add support for a new price source. Exactly one
/// provider is active per process; it is chosen at startup from
/// [`ProviderKind`](super::ProviderKind).
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use quotes_exporter_market_data::{MarketDataError, QuoteProvider};
///
/// struct FixedProvider(f64);
///
/// #[async_trait]
/// impl QuoteProvider for FixedProvider {
///     fn id(&self) -> &'static str {
///         "FIXED"
///     }
///
///     async fn quote(&self, _symbol: &str) -> Result<f64, MarketDataError> {
///         Ok(self.0)
///     }
/// }
/// ```
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "YAHOO" or "TWELVEDATA".
    /// Used for logging and error attribution.
    fn id(&self) -> &'static str;

    /// Whether the provider refuses to work without an API key.
    fn requires_api_key(&self) -> bool {
        false
    }

    /// Fetch the current price of a symbol.
    ///
    /// Symbols are matched case-insensitively; implementations normalize
    /// them before building the upstream request. A missing credential must
    /// surface as [`MarketDataError::ConfigurationMissing`], never as a zero
    /// price.
    async fn quote(&self, symbol: &str) -> Result<f64, MarketDataError>;
}
