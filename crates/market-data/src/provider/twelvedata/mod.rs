//! Twelve Data quote provider implementation.
//!
//! This module fetches real-time prices from the Twelve Data `/price`
//! endpoint. Every request needs an API key; without one the provider
//! refuses to call upstream.
//!
//! Free tier is limited to 8 API calls per minute.
//! API documentation: https://twelvedata.com/docs#real-time-price

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::errors::MarketDataError;
use crate::provider::QuoteProvider;

const BASE_URL: &str = "https://api.twelvedata.com";
const PROVIDER_ID: &str = "TWELVEDATA";

/// Environment variable the API key is conventionally read from.
pub const API_KEY_ENV: &str = "TWELVEDATA_API_KEY";

// ============================================================================
// API Response Structures
// ============================================================================

/// Response from /price endpoint.
///
/// On success only `price` is set (as a string). On failure Twelve Data
/// still answers HTTP 200 and fills `code`, `message` and `status`.
#[derive(Debug, Deserialize)]
struct PriceResponse {
    price: Option<String>,
    code: Option<u16>,
    message: Option<String>,
    status: Option<String>,
}

// ============================================================================
// TwelveDataProvider
// ============================================================================

/// Twelve Data quote provider.
pub struct TwelveDataProvider {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl TwelveDataProvider {
    /// Create a new Twelve Data provider.
    ///
    /// An absent or blank key is accepted here and reported per lookup.
    pub fn new(api_key: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        let api_key = api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        Self {
            client,
            api_key,
            base_url: BASE_URL.to_string(),
        }
    }

    /// Point the provider at another host (used by tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Make a GET request to the /price endpoint and return the body.
    async fn fetch(&self, symbol: &str, api_key: &str) -> Result<String, MarketDataError> {
        let url = format!("{}/price", self.base_url);

        debug!("Twelve Data request: /price for {}", symbol);

        let response = self
            .client
            .get(&url)
            .query(&[("symbol", symbol), ("apikey", api_key)])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MarketDataError::Timeout {
                        provider: PROVIDER_ID.to_string(),
                    }
                } else {
                    MarketDataError::Network(e)
                }
            })?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MarketDataError::provider(
                PROVIDER_ID,
                format!("HTTP {} - {}", status, body),
            ));
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl QuoteProvider for TwelveDataProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn requires_api_key(&self) -> bool {
        true
    }

    async fn quote(&self, symbol: &str) -> Result<f64, MarketDataError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| MarketDataError::ConfigurationMissing {
                provider: PROVIDER_ID.to_string(),
                setting: API_KEY_ENV.to_string(),
            })?;

        let symbol = symbol.trim().to_uppercase();
        let text = self.fetch(&symbol, api_key).await?;
        parse_price_response(&text)
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Turn a /price body into a price.
fn parse_price_response(text: &str) -> Result<f64, MarketDataError> {
    let response: PriceResponse = serde_json::from_str(text).map_err(|e| {
        MarketDataError::invalid(PROVIDER_ID, format!("Failed to parse price response: {}", e))
    })?;

    if response.status.as_deref() == Some("error") || response.code.is_some() {
        let message = response
            .message
            .unwrap_or_else(|| "unknown error".to_string());
        return match response.code {
            Some(429) => Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            }),
            Some(code) => Err(MarketDataError::provider(
                PROVIDER_ID,
                format!("code {} - {}", code, message),
            )),
            None => Err(MarketDataError::provider(PROVIDER_ID, message)),
        };
    }

    let raw = response
        .price
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| MarketDataError::invalid(PROVIDER_ID, "price is not included in response"))?;

    let price: f64 = raw
        .trim()
        .parse()
        .map_err(|_| MarketDataError::invalid(PROVIDER_ID, format!("price is not numeric: {}", raw)))?;

    if !price.is_finite() {
        return Err(MarketDataError::invalid(
            PROVIDER_ID,
            format!("price is not finite: {}", raw),
        ));
    }

    Ok(price)
}

// ============================================================================
// Tests
// ============================================================================
