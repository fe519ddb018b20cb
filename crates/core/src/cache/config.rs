//! Freshness, retention and capacity settings for the quote cache.

use std::time::Duration;

/// Default freshness window for cached quotes (10 minutes).
pub const DEFAULT_FRESHNESS: Duration = Duration::from_secs(10 * 60);

/// Default retention period before expired entries are purged (20 minutes).
pub const DEFAULT_RETENTION: Duration = Duration::from_secs(20 * 60);

/// Default upper bound on the number of cached symbols.
pub const DEFAULT_MAX_CAPACITY: u64 = 10_000;

/// Lifetime policy for [`QuoteCache`](super::QuoteCache) entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// How long a successful quote is reused without calling upstream.
    pub freshness: Duration,

    /// How often expired entries are swept out of memory.
    pub retention: Duration,

    /// How long a failed lookup is reused. `None` means "same as
    /// `freshness`", i.e. errors and successes are cached uniformly.
    pub error_freshness: Option<Duration>,

    /// Maximum number of symbols kept at once.
    pub max_capacity: u64,
}

impl CacheConfig {
    pub fn effective_error_freshness(&self) -> Duration {
        self.error_freshness.unwrap_or(self.freshness)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            freshness: DEFAULT_FRESHNESS,
            retention: DEFAULT_RETENTION,
            error_freshness: None,
            max_capacity: DEFAULT_MAX_CAPACITY,
        }
    }
}
