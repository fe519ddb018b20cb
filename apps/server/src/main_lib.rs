use std::sync::Arc;

use crate::config::Config;
use prometheus::Registry;
use quotes_exporter_core::{CacheConfig, ExporterMetrics, QuoteCache};
use quotes_exporter_market_data::{build_provider, QuoteProvider};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    /// Memoized fetcher shared by every scrape for the life of the process.
    pub cache: Arc<QuoteCache>,
    pub metrics: ExporterMetrics,
    /// Process-wide registry served on `/metrics`.
    pub registry: Registry,
}

impl AppState {
    pub fn new(provider: Arc<dyn QuoteProvider>, cache: CacheConfig) -> anyhow::Result<Arc<Self>> {
        let metrics = ExporterMetrics::new()?;
        let registry = Registry::new();
        metrics.register(&registry)?;

        Ok(Arc::new(Self {
            cache: Arc::new(QuoteCache::new(provider, cache)),
            metrics,
            registry,
        }))
    }
}

pub fn init_tracing() {
    let log_format = std::env::var("QE_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let provider = build_provider(config.provider, config.twelvedata_api_key.clone())?;
    let state = AppState::new(provider, config.cache.clone())?;
    state.cache.spawn_janitor();

    tracing::info!(
        "Quote cache: provider {}, freshness {:?}, error freshness {:?}, retention {:?}",
        state.cache.provider_id(),
        config.cache.freshness,
        config.cache.effective_error_freshness(),
        config.cache.retention
    );
    Ok(state)
}
