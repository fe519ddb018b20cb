//! Stub provider shared by the unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use quotes_exporter_market_data::{MarketDataError, QuoteProvider};

#[derive(Clone, Copy)]
enum Canned {
    Price(f64),
    Error,
    Invalid,
}

/// Call-counting provider with canned answers per symbol.
///
/// Unknown symbols answer with a provider error.
#[derive(Default)]
pub struct StubProvider {
    answers: HashMap<String, Canned>,
    delay: Option<Duration>,
    delays: HashMap<String, Duration>,
    requires_key: bool,
    api_key: Option<String>,
    total: AtomicUsize,
    per_symbol: Mutex<HashMap<String, usize>>,
}

impl StubProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_price(mut self, symbol: &str, price: f64) -> Self {
        self.answers.insert(symbol.to_string(), Canned::Price(price));
        self
    }

    pub fn with_error(mut self, symbol: &str) -> Self {
        self.answers.insert(symbol.to_string(), Canned::Error);
        self
    }

    pub fn with_invalid(mut self, symbol: &str) -> Self {
        self.answers.insert(symbol.to_string(), Canned::Invalid);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn with_delay_for(mut self, symbol: &str, delay: Duration) -> Self {
        self.delays.insert(symbol.to_string(), delay);
        self
    }

    /// Behave like a provider that needs a credential.
    pub fn requiring_key(mut self, api_key: Option<&str>) -> Self {
        self.requires_key = true;
        self.api_key = api_key.map(str::to_string);
        self
    }

    pub fn calls(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }

    pub fn calls_for(&self, symbol: &str) -> usize {
        self.per_symbol
            .lock()
            .unwrap()
            .get(symbol)
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait]
impl QuoteProvider for StubProvider {
    fn id(&self) -> &'static str {
        "STUB"
    }

    fn requires_api_key(&self) -> bool {
        self.requires_key
    }

    async fn quote(&self, symbol: &str) -> Result<f64, MarketDataError> {
        self.total.fetch_add(1, Ordering::SeqCst);
        *self
            .per_symbol
            .lock()
            .unwrap()
            .entry(symbol.to_string())
            .or_insert(0) += 1;

        if self.requires_key && self.api_key.is_none() {
            return Err(MarketDataError::ConfigurationMissing {
                provider: "STUB".to_string(),
                setting: "STUB_API_KEY".to_string(),
            });
        }

        if let Some(delay) = self.delays.get(symbol).copied().or(self.delay) {
            tokio::time::sleep(delay).await;
        }

        match self.answers.get(symbol).copied() {
            Some(Canned::Price(price)) => Ok(price),
            Some(Canned::Invalid) => Err(MarketDataError::InvalidData {
                provider: "STUB".to_string(),
                message: format!("price is not included in response for {}", symbol),
            }),
            Some(Canned::Error) | None => Err(MarketDataError::ProviderError {
                provider: "STUB".to_string(),
                message: format!("upstream refused {}", symbol),
            }),
        }
    }
}
