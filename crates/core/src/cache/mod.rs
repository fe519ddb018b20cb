//! Memoized quote fetching with moka.
//!
//! [`QuoteCache`] sits between the collector and the active
//! [`QuoteProvider`]. It guarantees:
//!
//! - at most one upstream call in flight per symbol; concurrent callers for
//!   the same symbol await that call and share its result
//! - a result (price or error) is reused until its freshness window ends
//! - unrelated symbols never wait on each other
//! - an entry is only written when its own fetch completes, so a dropped
//!   scrape never leaves a half-written entry behind
//!
//! The cache is created once at process start and lives until exit. Tests
//! build a fresh instance each time.

mod config;

pub use config::CacheConfig;

use std::sync::Arc;
use std::time::{Duration, Instant};

use moka::future::Cache;
use moka::Expiry;
use quotes_exporter_market_data::{MarketDataError, QuoteProvider};
use tokio::task::JoinHandle;
use tracing::debug;

/// Outcome of one upstream lookup, as stored in the cache.
pub type QuoteResult = Result<f64, Arc<MarketDataError>>;

/// What [`QuoteCache::resolve`] hands back to the caller.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub result: QuoteResult,
    /// `true` when this call did not trigger the upstream request.
    pub from_cache: bool,
}

/// Per-entry lifetime: successes live for `freshness`, failures for
/// `error_freshness`.
struct OutcomeExpiry {
    freshness: Duration,
    error_freshness: Duration,
}

impl Expiry<String, QuoteResult> for OutcomeExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &QuoteResult,
        _created_at: Instant,
    ) -> Option<Duration> {
        match value {
            Ok(_) => Some(self.freshness),
            Err(_) => Some(self.error_freshness),
        }
    }
}

/// Time-bounded, per-symbol memoization of provider calls.
pub struct QuoteCache {
    provider: Arc<dyn QuoteProvider>,
    entries: Cache<String, QuoteResult>,
    config: CacheConfig,
}

impl QuoteCache {
    pub fn new(provider: Arc<dyn QuoteProvider>, config: CacheConfig) -> Self {
        let entries = Cache::builder()
            .max_capacity(config.max_capacity)
            .expire_after(OutcomeExpiry {
                freshness: config.freshness,
                error_freshness: config.effective_error_freshness(),
            })
            .build();

        Self {
            provider,
            entries,
            config,
        }
    }

    /// Resolve the current price of `symbol`.
    ///
    /// Returns the stored result while it is fresh. Otherwise calls the
    /// provider exactly once, stores whatever it returned and hands it to
    /// every caller that was waiting on the same symbol.
    pub async fn resolve(&self, symbol: &str) -> Resolution {
        let key = cache_key(symbol);
        let provider = Arc::clone(&self.provider);
        let lookup = key.clone();

        let entry = self
            .entries
            .entry(key)
            .or_insert_with(async move {
                debug!("Fetching {} from {}", lookup, provider.id());
                provider.quote(&lookup).await.map_err(Arc::new)
            })
            .await;

        Resolution {
            from_cache: !entry.is_fresh(),
            result: entry.into_value(),
        }
    }

    /// Id of the wrapped provider.
    pub fn provider_id(&self) -> &'static str {
        self.provider.id()
    }

    /// Approximate number of live entries.
    pub fn entry_count(&self) -> u64 {
        self.entries.entry_count()
    }

    /// Drop every entry; the next resolve of each symbol goes upstream.
    pub fn invalidate_all(&self) {
        self.entries.invalidate_all();
    }

    /// Reclaim expired entries now instead of waiting for the janitor.
    pub async fn purge_expired(&self) {
        self.entries.run_pending_tasks().await;
    }

    /// Start the background task that purges expired entries every
    /// retention period.
    ///
    /// The task holds a weak reference and stops once the cache is dropped.
    pub fn spawn_janitor(self: &Arc<Self>) -> JoinHandle<()> {
        let cache = Arc::downgrade(self);
        let period = self.config.retention.max(Duration::from_millis(1));

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // The first tick completes immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let Some(cache) = cache.upgrade() else {
                    break;
                };
                cache.purge_expired().await;
                debug!("Quote cache purged, {} entries left", cache.entry_count());
            }
        })
    }
}

/// Symbols are case-insensitive; the upper-cased form is the cache key.
fn cache_key(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}
