use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use lazy_static::lazy_static;
#[cfg(target_os = "linux")]
use prometheus::process_collector::ProcessCollector;
use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};
use std::sync::Arc;
use std::time::Instant;

use crate::http_server::AppState;

lazy_static! {
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("http_requests_total", "Total number of HTTP requests"),
        &["method", "endpoint", "status"]
    )
    .unwrap();
    pub static ref HTTP_REQUEST_DURATION: HistogramVec = HistogramVec::new(
        HistogramOpts::new("http_request_duration_seconds", "HTTP request duration in seconds").buckets(vec![
            0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0
        ]),
        &["method", "endpoint"]
    )
    .unwrap();
    pub static ref HTTP_REQUESTS_IN_FLIGHT: IntGauge = IntGauge::new(
        "http_requests_in_flight",
        "Number of HTTP requests currently being processed"
    )
    .unwrap();
    pub static ref HTTP_ERRORS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("http_errors_total", "Total number of HTTP errors"),
        &["method", "endpoint", "status"]
    )
    .unwrap();

    // Twitter API metrics
    pub static ref TWITTER_API_CALLS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("twitter_api_calls_total", "Total number of Twitter API calls"),
        &["operation"]
    )
    .unwrap();
    pub static ref TWITTER_API_CALL_DURATION: HistogramVec = HistogramVec::new(
        HistogramOpts::new("twitter_api_call_duration_seconds", "Twitter API call duration in seconds")
            .buckets(vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["operation"]
    )
    .unwrap();
    pub static ref TWITTER_API_ERRORS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("twitter_api_errors_total", "Total number of Twitter API errors"),
        &["operation", "error_type"]
    )
    .unwrap();

    // Resolution outcomes: "ok", an error code such as "605", or "unexpected"
    pub static ref RESOLVE_OUTCOMES_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("resolve_outcomes_total", "Total number of media resolutions by outcome"),
        &["outcome"]
    )
    .unwrap();
}

#[derive(Debug, Clone)]
pub struct Metrics {
    pub registry: Arc<Registry>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        #[cfg(target_os = "linux")]
        {
            let process_collector = ProcessCollector::for_self();
            registry.register(Box::new(process_collector)).unwrap();
        }

        registry.register(Box::new(HTTP_REQUESTS_TOTAL.clone())).unwrap();
        registry.register(Box::new(HTTP_REQUEST_DURATION.clone())).unwrap();
        registry.register(Box::new(HTTP_REQUESTS_IN_FLIGHT.clone())).unwrap();
        registry.register(Box::new(HTTP_ERRORS_TOTAL.clone())).unwrap();

        registry.register(Box::new(TWITTER_API_CALLS_TOTAL.clone())).unwrap();
        registry.register(Box::new(TWITTER_API_CALL_DURATION.clone())).unwrap();
        registry.register(Box::new(TWITTER_API_ERRORS_TOTAL.clone())).unwrap();

        registry.register(Box::new(RESOLVE_OUTCOMES_TOTAL.clone())).unwrap();

        Self {
            registry: Arc::new(registry),
        }
    }
}

/// Helper to normalize endpoints (remove IDs, UUIDs, etc.)
/// Example: /tweets/123?lang=en -> tweets/:id
pub fn normalize_path(path: &str) -> String {
    let path_only = path.split('?').next().unwrap_or(path);

    let segments: Vec<&str> = path_only.split('/').filter(|s| !s.is_empty()).collect();

    segments
        .iter()
        .map(|s| {
            if s.parse::<i64>().is_ok() || s.len() == 36 {
                ":id"
            } else {
                *s
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Middleware for tracking HTTP metrics
pub async fn track_metrics(req: Request, next: Next) -> Response {
    let path = req.uri().path().to_string();
    let method = req.method().clone();

    if path == "/metrics" {
        return next.run(req).await;
    }

    let endpoint = normalize_path(&path);

    HTTP_REQUESTS_IN_FLIGHT.inc();
    let start = Instant::now();

    let response = next.run(req).await;

    let duration = start.elapsed().as_secs_f64();
    HTTP_REQUEST_DURATION
        .with_label_values(&[method.as_str(), &endpoint])
        .observe(duration);

    let status = response.status();
    let status_str = status.as_u16().to_string();

    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method.as_str(), &endpoint, &status_str])
        .inc();

    if status.is_client_error() || status.is_server_error() {
        HTTP_ERRORS_TOTAL
            .with_label_values(&[method.as_str(), &endpoint, &status_str])
            .inc();
    }

    HTTP_REQUESTS_IN_FLIGHT.dec();

    response
}

/// Track Twitter API call metrics
///
/// Wraps a single upstream call and records its duration and whether it failed.
///
/// # Arguments
/// * `operation` - The Twitter endpoint being called (e.g., "statuses_show")
/// * `f` - The future performing the call
pub async fn track_twitter_api_call<T, E, F>(operation: &str, f: F) -> Result<T, E>
where
    F: std::future::Future<Output = Result<T, E>>,
{
    let start = Instant::now();

    TWITTER_API_CALLS_TOTAL.with_label_values(&[operation]).inc();

    let result = f.await;

    let duration = start.elapsed().as_secs_f64();
    TWITTER_API_CALL_DURATION
        .with_label_values(&[operation])
        .observe(duration);

    if result.is_err() {
        TWITTER_API_ERRORS_TOTAL
            .with_label_values(&[operation, "api_error"])
            .inc();
    }

    result
}

pub fn track_resolve_outcome(outcome: &str) {
    RESOLVE_OUTCOMES_TOTAL.with_label_values(&[outcome]).inc();
}

pub async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = state.metrics.registry.gather();

    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            String::from("Failed to encode metrics"),
        );
    }

    match String::from_utf8(buffer) {
        Ok(body) => (StatusCode::OK, body),
        Err(e) => {
            tracing::error!("Metrics output is not valid UTF-8: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                String::from("Failed to encode metrics"),
            )
        }
    }
}
