//! Error types and outcome classification for the market data crate.
//!
//! This module provides:
//! - [`MarketDataError`]: The main error enum for all quote lookups
//! - [`ErrorKind`]: Coarse classification used for counting and logging

mod kind;

pub use kind::ErrorKind;

use thiserror::Error;

/// Errors that can occur while fetching a quote from a provider.
///
/// Each variant is classified into an [`ErrorKind`] via the [`kind`](Self::kind)
/// method. The collector uses the kind to label the per-symbol outcome.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// A credential or setting the provider needs is absent.
    /// Every lookup fails until the process is reconfigured.
    #[error("Missing configuration for {provider}: {setting} is not set")]
    ConfigurationMissing {
        /// The provider that needs the setting
        provider: String,
        /// Name of the missing setting (e.g. an environment variable)
        setting: String,
    },

    /// The provider rate limited the request (HTTP 429 or in-band code).
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// A provider-specific error occurred (bad status, in-band error body).
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The response was readable but carried no usable numeric price.
    #[error("Invalid data from {provider}: {message}")]
    InvalidData {
        /// The provider that returned the data
        provider: String,
        /// What was wrong with the payload
        message: String,
    },

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MarketDataError {
    /// Returns the outcome classification for this error.
    ///
    /// - [`ErrorKind::ConfigurationMissing`]: the provider cannot run at all
    /// - [`ErrorKind::ProviderError`]: transport, status or upstream failure
    /// - [`ErrorKind::InvalidData`]: payload without a usable price
    ///
    /// # Examples
    ///
    /// ```
    /// use quotes_exporter_market_data::errors::{ErrorKind, MarketDataError};
    ///
    /// let error = MarketDataError::RateLimited { provider: "TWELVEDATA".to_string() };
    /// assert_eq!(error.kind(), ErrorKind::ProviderError);
    ///
    /// let error = MarketDataError::InvalidData {
    ///     provider: "TWELVEDATA".to_string(),
    ///     message: "price is missing".to_string(),
    /// };
    /// assert_eq!(error.kind(), ErrorKind::InvalidData);
    /// ```
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ConfigurationMissing { .. } => ErrorKind::ConfigurationMissing,

            Self::RateLimited { .. }
            | Self::Timeout { .. }
            | Self::ProviderError { .. }
            | Self::Network(_) => ErrorKind::ProviderError,

            Self::InvalidData { .. } => ErrorKind::InvalidData,
        }
    }

    pub(crate) fn provider(provider: &str, message: impl Into<String>) -> Self {
        Self::ProviderError {
            provider: provider.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn invalid(provider: &str, message: impl Into<String>) -> Self {
        Self::InvalidData {
            provider: provider.to_string(),
            message: message.into(),
        }
    }
}
