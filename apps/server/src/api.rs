use std::sync::Arc;

use crate::{
    config::Config,
    error::ApiResult,
    exposition::{content_type, render_registry, render_scrape},
    main_lib::AppState,
};
use axum::{
    extract::{RawQuery, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use quotes_exporter_core::Collector;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

pub async fn healthz() -> &'static str {
    "ok"
}

/// Scrape endpoint: `/price?symbols=AAA,BBB&symbols=CCC`.
async fn scrape_prices(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> ApiResult<Response> {
    let collector = Collector::from_query(
        query.as_deref(),
        state.cache.clone(),
        state.metrics.clone(),
    )?;
    let samples = collector.collect().await;
    let body = render_scrape(&samples, &state.metrics)?;
    Ok(([(header::CONTENT_TYPE, content_type())], body).into_response())
}

/// Self-metrics only, from the process-wide registry.
async fn process_metrics(State(state): State<Arc<AppState>>) -> ApiResult<Response> {
    let body = render_registry(&state.registry)?;
    Ok(([(header::CONTENT_TYPE, content_type())], body).into_response())
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    Router::new()
        .route("/price", get(scrape_prices))
        .route("/metrics", get(process_metrics))
        .route("/healthz", get(healthz))
        .with_state(state)
        // Layers wrap outward: the id must be set before it is propagated.
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
}
