/// Classification of a failed quote lookup.
///
/// Used by the collector to tag each per-symbol attempt and by logging to
/// tell operators whether a failure is on our side or upstream.
///
/// | Kind | Typical cause | Fixed by |
/// |------|---------------|----------|
/// | `ConfigurationMissing` | API key not set | Operator |
/// | `ProviderError` | Network, HTTP status, rate limit | Time |
/// | `InvalidData` | Missing or non-numeric price | Provider / symbol |
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    /// A required credential or setting is absent.
    ConfigurationMissing,

    /// Transport or upstream failure, including rate limits and timeouts.
    ProviderError,

    /// The provider answered but without a usable numeric price.
    InvalidData,
}

impl ErrorKind {
    /// Short lowercase label, suitable for log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ConfigurationMissing => "configuration_missing",
            Self::ProviderError => "provider_error",
            Self::InvalidData => "invalid_data",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
