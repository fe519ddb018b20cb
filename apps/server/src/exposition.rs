//! Prometheus text exposition of scrape results.

use prometheus::{Encoder, GaugeVec, Opts, Registry, TextEncoder};
use quotes_exporter_core::{ExporterMetrics, Sample};

pub const PRICE_METRIC: &str = "quotes_exporter_price";

/// Content type of the text exposition format.
pub fn content_type() -> String {
    TextEncoder::new().format_type().to_string()
}

/// Render one scrape: a price gauge per sample plus the self-metrics.
///
/// Each scrape gets its own registry so prices of symbols that are no
/// longer requested never linger. Duplicate symbols share one label set;
/// the last value wins.
pub fn render_scrape(samples: &[Sample], metrics: &ExporterMetrics) -> Result<String, prometheus::Error> {
    let registry = Registry::new();
    metrics.register(&registry)?;

    let prices = GaugeVec::new(Opts::new(PRICE_METRIC, "Asset Price."), &["symbol", "name"])?;
    for sample in samples {
        prices
            .with_label_values(&[sample.symbol.as_str(), sample.name.as_str()])
            .set(sample.price);
    }
    registry.register(Box::new(prices))?;

    render_registry(&registry)
}

/// Encode everything in `registry` in the text format.
pub fn render_registry(registry: &Registry) -> Result<String, prometheus::Error> {
    let mut buffer = Vec::new();
    TextEncoder::new().encode(&registry.gather(), &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
}
