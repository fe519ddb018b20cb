//! Provider selection.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tracing::{info, warn};

use crate::errors::MarketDataError;

use super::twelvedata::TwelveDataProvider;
use super::yahoo::YahooProvider;
use super::QuoteProvider;

/// The upstream quote source a process talks to.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ProviderKind {
    /// Yahoo Finance chart API, no credential needed.
    #[default]
    Yahoo,
    /// Twelve Data price endpoint, needs an API key.
    TwelveData,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yahoo => "yahoo",
            Self::TwelveData => "twelvedata",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a provider name is not recognized.
#[derive(Debug, thiserror::Error)]
#[error("Unknown quote provider: {0} (expected \"yahoo\" or \"twelvedata\")")]
pub struct UnknownProvider(pub String);

impl FromStr for ProviderKind {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yahoo" => Ok(Self::Yahoo),
            "twelvedata" | "twelve_data" | "twelve-data" => Ok(Self::TwelveData),
            other => Err(UnknownProvider(other.to_string())),
        }
    }
}

/// Build the provider selected by `kind`.
///
/// `api_key` is only consulted by providers that need one. A missing key
/// does not fail construction: the provider is still built and reports
/// `ConfigurationMissing` on every lookup, so the scrape endpoint keeps
/// answering and the error counter shows the problem.
pub fn build_provider(
    kind: ProviderKind,
    api_key: Option<String>,
) -> Result<Arc<dyn QuoteProvider>, MarketDataError> {
    let has_key = api_key.as_deref().is_some_and(|k| !k.trim().is_empty());

    let provider: Arc<dyn QuoteProvider> = match kind {
        ProviderKind::Yahoo => Arc::new(YahooProvider::new()?),
        ProviderKind::TwelveData => Arc::new(TwelveDataProvider::new(api_key)),
    };

    if provider.requires_api_key() && !has_key {
        warn!(
            "Provider {} requires an API key but none is configured; every lookup will fail",
            provider.id()
        );
    }

    info!("Initialized quote provider: {}", provider.id());
    Ok(provider)
}
