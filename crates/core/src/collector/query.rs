//! Symbol list extraction from a scrape request.

use crate::errors::{CollectorError, Result};

/// Query parameter carrying comma-separated symbols.
pub const SYMBOLS_PARAM: &str = "symbols";

/// Extract the symbol list from a raw query string.
///
/// A typical query looks like `symbols=AAA,BBB&symbols=CCC`; all sub-lists
/// are concatenated in order. Blank tokens are dropped and whitespace is
/// trimmed. Duplicates are kept.
///
/// An absent `symbols` parameter is a [`CollectorError::MissingParameter`];
/// a present but empty one (`symbols=`) yields an empty list.
pub fn parse_symbols(raw_query: Option<&str>) -> Result<Vec<String>> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_str(raw_query.unwrap_or(""))
        .map_err(|e| CollectorError::InvalidQuery(e.to_string()))?;

    let mut present = false;
    let mut symbols = Vec::new();

    for (_, value) in pairs.into_iter().filter(|(name, _)| name == SYMBOLS_PARAM) {
        present = true;
        symbols.extend(
            value
                .split(',')
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(str::to_string),
        );
    }

    if !present {
        return Err(CollectorError::MissingParameter);
    }

    Ok(symbols)
}
