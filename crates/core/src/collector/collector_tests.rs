//! Tests for the Collector contract.
//!
//! # Contract Points
//!
//! 1. Only symbols that resolve to a finite price produce a sample
//! 2. One failing symbol never stops the others
//! 3. Every failed symbol bumps the error counter exactly once
//! 4. The query counter moves once per pass, the duration histogram once per symbol
//! 5. The shared cache shields the provider across passes

use std::sync::Arc;
use std::time::Duration;

use super::*;
use crate::cache::CacheConfig;
use crate::errors::CollectorError;
use crate::test_support::StubProvider;

fn setup(provider: StubProvider) -> (Arc<StubProvider>, Arc<QuoteCache>, ExporterMetrics) {
    let provider = Arc::new(provider);
    let cache = Arc::new(QuoteCache::new(provider.clone(), CacheConfig::default()));
    let metrics = ExporterMetrics::new().unwrap();
    (provider, cache, metrics)
}

fn sample(symbol: &str, price: f64) -> Sample {
    Sample {
        symbol: symbol.to_string(),
        name: symbol.to_string(),
        price,
    }
}

#[tokio::test]
async fn test_end_to_end_partial_failure() {
    let (_, cache, metrics) = setup(
        StubProvider::new()
            .with_price("AAA", 10.0)
            .with_error("BBB")
            .with_price("CCC", 30.0),
    );

    let collector =
        Collector::from_query(Some("symbols=AAA,BBB&symbols=CCC"), cache, metrics.clone()).unwrap();
    assert_eq!(collector.symbols(), ["AAA", "BBB", "CCC"]);

    let samples = collector.collect().await;

    assert_eq!(samples, vec![sample("AAA", 10.0), sample("CCC", 30.0)]);
    assert_eq!(metrics.failed_queries_total.get(), 1);
    assert_eq!(metrics.queries_total.get(), 1);
    assert_eq!(metrics.query_duration.get_sample_count(), 3);
}

#[tokio::test]
async fn test_failure_does_not_starve_later_symbols() {
    let (_, cache, metrics) = setup(StubProvider::new().with_error("A").with_price("B", 2.0));

    let collector = Collector::new(vec!["A".into(), "B".into()], cache, metrics.clone());
    let collection = collector.collect_outcomes().await;

    assert_eq!(collection.samples, vec![sample("B", 2.0)]);
    assert_eq!(collection.reports[0].outcome, RequestOutcome::ProviderError);
    assert_eq!(collection.reports[1].outcome, RequestOutcome::Success);
    assert_eq!(collection.failures(), 1);
    assert_eq!(metrics.failed_queries_total.get(), 1);
}

#[tokio::test]
async fn test_outcomes_are_classified() {
    let (_, cache, metrics) = setup(
        StubProvider::new()
            .with_price("OK", 1.0)
            .with_error("DOWN")
            .with_invalid("EMPTY")
            .with_price("NAN", f64::NAN),
    );

    let symbols = vec!["OK".into(), "DOWN".into(), "EMPTY".into(), "NAN".into()];
    let collection = Collector::new(symbols, cache, metrics.clone())
        .collect_outcomes()
        .await;

    let outcomes: Vec<RequestOutcome> = collection.reports.iter().map(|r| r.outcome).collect();
    assert_eq!(
        outcomes,
        vec![
            RequestOutcome::Success,
            RequestOutcome::ProviderError,
            RequestOutcome::InvalidData,
            RequestOutcome::InvalidData,
        ]
    );
    assert_eq!(collection.samples, vec![sample("OK", 1.0)]);
    assert_eq!(metrics.failed_queries_total.get(), 3);
}

#[tokio::test]
async fn test_missing_credential_fails_every_symbol() {
    let (provider, cache, metrics) = setup(
        StubProvider::new()
            .with_price("AAA", 1.0)
            .with_price("BBB", 2.0)
            .requiring_key(None),
    );

    let collector = Collector::from_query(Some("symbols=AAA,BBB"), cache, metrics.clone()).unwrap();
    let collection = collector.collect_outcomes().await;

    assert!(collection.samples.is_empty());
    assert!(collection
        .reports
        .iter()
        .all(|r| r.outcome == RequestOutcome::ConfigurationMissing));
    assert_eq!(metrics.failed_queries_total.get(), 2);
    assert_eq!(provider.calls(), 2);
}

#[tokio::test]
async fn test_missing_parameter() {
    let (_, cache, metrics) = setup(StubProvider::new());

    let err = Collector::from_query(Some("other=1"), cache.clone(), metrics.clone())
        .err()
        .unwrap();
    assert_eq!(err, CollectorError::MissingParameter);

    let err = Collector::from_query(None, cache, metrics.clone()).err().unwrap();
    assert_eq!(err, CollectorError::MissingParameter);

    // Construction failed, so nothing ran.
    assert_eq!(metrics.queries_total.get(), 0);
}

#[tokio::test]
async fn test_empty_parameter_yields_no_samples() {
    let (provider, cache, metrics) = setup(StubProvider::new());

    let collector = Collector::from_query(Some("symbols="), cache, metrics.clone()).unwrap();
    assert!(collector.symbols().is_empty());

    let samples = collector.collect().await;
    assert!(samples.is_empty());
    assert_eq!(provider.calls(), 0);
    assert_eq!(metrics.failed_queries_total.get(), 0);
    assert_eq!(metrics.queries_total.get(), 1);
}

#[tokio::test]
async fn test_duplicates_produce_duplicate_samples_with_one_upstream_call() {
    let (provider, cache, metrics) = setup(StubProvider::new().with_price("AAA", 7.0));

    let collector = Collector::from_query(Some("symbols=AAA,AAA"), cache, metrics).unwrap();
    let samples = collector.collect().await;

    assert_eq!(samples, vec![sample("AAA", 7.0), sample("AAA", 7.0)]);
    assert_eq!(provider.calls_for("AAA"), 1);
}

#[tokio::test]
async fn test_labels_keep_request_spelling() {
    let (provider, cache, metrics) = setup(StubProvider::new().with_price("AAPL", 190.0));

    let samples = Collector::new(vec!["aapl".into()], cache, metrics)
        .collect()
        .await;

    assert_eq!(samples, vec![sample("aapl", 190.0)]);
    assert_eq!(provider.calls_for("AAPL"), 1);
}

#[tokio::test]
async fn test_cache_is_shared_across_scrapes() {
    let (provider, cache, metrics) = setup(StubProvider::new().with_price("AAA", 1.0).with_error("BBB"));

    let first = Collector::new(vec!["AAA".into(), "BBB".into()], cache.clone(), metrics.clone())
        .collect_outcomes()
        .await;
    assert!(first.reports.iter().all(|r| !r.from_cache));

    let second = Collector::new(vec!["AAA".into(), "BBB".into()], cache, metrics.clone())
        .collect_outcomes()
        .await;
    assert!(second.reports.iter().all(|r| r.from_cache));

    assert_eq!(provider.calls(), 2);
    assert_eq!(metrics.queries_total.get(), 2);
    // The cached error still counts as a failed query on every scrape.
    assert_eq!(metrics.failed_queries_total.get(), 2);
}

#[tokio::test]
async fn test_symbols_resolve_concurrently() {
    let (_, cache, metrics) = setup(
        StubProvider::new()
            .with_price("A", 1.0)
            .with_price("B", 2.0)
            .with_price("C", 3.0)
            .with_delay(Duration::from_millis(200)),
    );

    let collector = Collector::new(vec!["A".into(), "B".into(), "C".into()], cache, metrics);
    let collection = tokio::time::timeout(Duration::from_millis(500), collector.collect_outcomes())
        .await
        .expect("lookups run in parallel");

    assert_eq!(
        collection.samples,
        vec![sample("A", 1.0), sample("B", 2.0), sample("C", 3.0)]
    );
    // Each report times its own lookup, not the whole pass.
    for report in &collection.reports {
        assert!(report.elapsed >= Duration::from_millis(200));
        assert!(report.elapsed < Duration::from_millis(500));
    }
}

#[tokio::test]
async fn test_cache_hits_report_short_elapsed() {
    let (_, cache, metrics) = setup(
        StubProvider::new()
            .with_price("AAA", 1.0)
            .with_delay(Duration::from_millis(200)),
    );

    let first = Collector::new(vec!["AAA".into()], cache.clone(), metrics.clone())
        .collect_outcomes()
        .await;
    let second = Collector::new(vec!["AAA".into()], cache, metrics)
        .collect_outcomes()
        .await;

    assert!(first.reports[0].elapsed >= Duration::from_millis(200));
    assert!(second.reports[0].from_cache);
    assert!(second.reports[0].elapsed < Duration::from_millis(200));
}

#[tokio::test]
async fn test_concurrent_scrapes_share_one_upstream_call() {
    let (provider, cache, metrics) = setup(
        StubProvider::new()
            .with_price("AAA", 4.0)
            .with_delay(Duration::from_millis(100)),
    );

    let scrapes = (0..8).map(|_| {
        let collector = Collector::new(vec!["AAA".into()], cache.clone(), metrics.clone());
        tokio::spawn(async move { collector.collect().await })
    });

    for joined in futures::future::join_all(scrapes).await {
        assert_eq!(joined.unwrap(), vec![sample("AAA", 4.0)]);
    }
    assert_eq!(provider.calls(), 1);
    assert_eq!(metrics.queries_total.get(), 8);
}

#[test]
fn test_outcome_from_error_kind() {
    use quotes_exporter_market_data::ErrorKind;

    assert_eq!(
        RequestOutcome::from(ErrorKind::ConfigurationMissing),
        RequestOutcome::ConfigurationMissing
    );
    assert_eq!(
        RequestOutcome::from(ErrorKind::ProviderError),
        RequestOutcome::ProviderError
    );
    assert_eq!(
        RequestOutcome::from(ErrorKind::InvalidData),
        RequestOutcome::InvalidData
    );
    assert!(RequestOutcome::Success.is_success());
}
