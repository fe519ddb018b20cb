//! Yahoo Finance quote provider.
//!
//! This provider uses the Yahoo Finance chart API to fetch the latest price
//! for equities/ETFs (e.g., AAPL, SHOP.TO), cryptocurrencies (e.g., BTC-USD)
//! and foreign exchange rates (e.g., EURUSD=X). No API key is needed.

use async_trait::async_trait;
use tracing::{debug, warn};
use yahoo_finance_api as yahoo;

use crate::errors::MarketDataError;
use crate::provider::QuoteProvider;

const PROVIDER_ID: &str = "YAHOO";

/// Yahoo Finance quote provider.
pub struct YahooProvider {
    connector: yahoo::YahooConnector,
}

impl YahooProvider {
    /// Create a new Yahoo Finance provider.
    pub fn new() -> Result<Self, MarketDataError> {
        let connector = yahoo::YahooConnector::new().map_err(|e| {
            MarketDataError::provider(
                PROVIDER_ID,
                format!("Failed to initialize Yahoo connector: {}", e),
            )
        })?;
        Ok(Self { connector })
    }
}

#[async_trait]
impl QuoteProvider for YahooProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn quote(&self, symbol: &str) -> Result<f64, MarketDataError> {
        let symbol = symbol.trim().to_uppercase();

        debug!("Fetching latest quote for {} from Yahoo", symbol);

        let response = self
            .connector
            .get_latest_quotes(&symbol, "1d")
            .await
            .map_err(|e| map_connector_error(&symbol, e))?;

        let quote = response.last_quote().map_err(|e| {
            warn!("No quotes returned for {}: {}", symbol, e);
            map_connector_error(&symbol, e)
        })?;

        validate_close(&symbol, quote.close)
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Map a connector error onto our taxonomy.
///
/// An empty chart means Yahoo answered but had nothing usable for the
/// symbol, which is a data problem rather than a transport one.
fn map_connector_error(symbol: &str, error: yahoo::YahooError) -> MarketDataError {
    if matches!(error, yahoo::YahooError::NoQuotes | yahoo::YahooError::NoResult) {
        MarketDataError::invalid(PROVIDER_ID, format!("No quote data for symbol: {}", symbol))
    } else {
        MarketDataError::provider(PROVIDER_ID, error.to_string())
    }
}

fn validate_close(symbol: &str, close: f64) -> Result<f64, MarketDataError> {
    if close.is_finite() {
        Ok(close)
    } else {
        Err(MarketDataError::invalid(
            PROVIDER_ID,
            format!("Invalid close price for {}: {}", symbol, close),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    #[test]
    fn test_provider_id() {
        let provider = YahooProvider::new().unwrap();
        assert_eq!(provider.id(), "YAHOO");
        assert!(!provider.requires_api_key());
    }

    #[test]
    fn test_empty_chart_is_invalid_data() {
        let err = map_connector_error("ZZZZ", yahoo::YahooError::NoQuotes);
        assert_eq!(err.kind(), ErrorKind::InvalidData);
        assert!(err.to_string().contains("ZZZZ"));

        let err = map_connector_error("ZZZZ", yahoo::YahooError::NoResult);
        assert_eq!(err.kind(), ErrorKind::InvalidData);
    }

    #[test]
    fn test_validate_close() {
        assert_eq!(validate_close("AAPL", 190.25).unwrap(), 190.25);
        assert_eq!(
            validate_close("AAPL", f64::NAN).unwrap_err().kind(),
            ErrorKind::InvalidData
        );
        assert_eq!(
            validate_close("AAPL", f64::INFINITY).unwrap_err().kind(),
            ErrorKind::InvalidData
        );
    }
}
