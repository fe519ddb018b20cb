use std::{net::SocketAddr, time::Duration};

use anyhow::Context;
use quotes_exporter_core::CacheConfig;
use quotes_exporter_market_data::{provider::twelvedata::API_KEY_ENV, ProviderKind};

pub const LISTEN_ADDR_ENV: &str = "QE_LISTEN_ADDR";
pub const PROVIDER_ENV: &str = "QE_PROVIDER";
pub const CACHE_FRESHNESS_ENV: &str = "QE_CACHE_FRESHNESS_SECS";
pub const CACHE_RETENTION_ENV: &str = "QE_CACHE_RETENTION_SECS";
pub const CACHE_ERROR_FRESHNESS_ENV: &str = "QE_CACHE_ERROR_FRESHNESS_SECS";
pub const REQUEST_TIMEOUT_ENV: &str = "QE_REQUEST_TIMEOUT_MS";

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:9340";
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub provider: ProviderKind,
    pub twelvedata_api_key: Option<String>,
    pub cache: CacheConfig,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let listen_addr: SocketAddr = lookup(LISTEN_ADDR_ENV)
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string())
            .parse()
            .with_context(|| format!("Invalid {}", LISTEN_ADDR_ENV))?;

        let provider = match lookup(PROVIDER_ENV) {
            Some(name) if !name.trim().is_empty() => name
                .parse::<ProviderKind>()
                .with_context(|| format!("Invalid {}", PROVIDER_ENV))?,
            _ => ProviderKind::default(),
        };

        let twelvedata_api_key = lookup(API_KEY_ENV)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        let defaults = CacheConfig::default();
        let freshness = secs(&lookup, CACHE_FRESHNESS_ENV).unwrap_or(defaults.freshness);
        let cache = CacheConfig {
            freshness,
            retention: secs(&lookup, CACHE_RETENTION_ENV).unwrap_or(defaults.retention),
            error_freshness: secs(&lookup, CACHE_ERROR_FRESHNESS_ENV),
            ..defaults
        };

        let timeout_ms: u64 = lookup(REQUEST_TIMEOUT_ENV)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS);

        Ok(Self {
            listen_addr,
            provider,
            twelvedata_api_key,
            cache,
            request_timeout: Duration::from_millis(timeout_ms),
        })
    }
}

fn secs<F>(lookup: &F, key: &str) -> Option<Duration>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}
