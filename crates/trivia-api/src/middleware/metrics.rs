//! # Prometheus Metrics
//!
//! HTTP request metrics kept in a `prometheus` registry: a request counter
//! labelled by method, matched route and status class, plus a latency
//! histogram. The middleware records every response; `GET /metrics`
//! gathers the registry in the text exposition format.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{MatchedPath, Request};
use axum::http::{header, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Extension;
use prometheus::core::Collector;
use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};

/// Route label for requests that matched no route.
const UNMATCHED_ROUTE: &str = "unmatched";

/// Shared metrics state backed by a Prometheus registry.
#[derive(Clone)]
pub struct ApiMetrics {
    inner: Arc<Inner>,
}

struct Inner {
    registry: Registry,
    http_requests_total: IntCounterVec,
    http_request_duration_seconds: HistogramVec,
}

impl std::fmt::Debug for ApiMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiMetrics")
            .field("requests", &self.requests())
            .field("client_errors", &self.client_errors())
            .field("server_errors", &self.server_errors())
            .finish()
    }
}

impl ApiMetrics {
    /// Create a metrics instance with a fresh registry.
    pub fn new() -> Self {
        let registry = Registry::new();

        let http_requests_total = IntCounterVec::new(
            Opts::new("trivia_http_requests_total", "Total HTTP requests"),
            &["method", "route", "status_class"],
        )
        .expect("metric can be created");

        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "trivia_http_request_duration_seconds",
                "HTTP request duration in seconds",
            )
            .buckets(vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5]),
            &["method", "route"],
        )
        .expect("metric can be created");

        registry
            .register(Box::new(http_requests_total.clone()))
            .expect("metric can be registered");
        registry
            .register(Box::new(http_request_duration_seconds.clone()))
            .expect("metric can be registered");

        Self {
            inner: Arc::new(Inner {
                registry,
                http_requests_total,
                http_request_duration_seconds,
            }),
        }
    }

    /// Requests seen so far, across all labels.
    pub fn requests(&self) -> u64 {
        self.count_where(|_| true)
    }

    /// Responses with a 4xx status.
    pub fn client_errors(&self) -> u64 {
        self.count_where(|class| class == "4xx")
    }

    /// Responses with a 5xx status.
    pub fn server_errors(&self) -> u64 {
        self.count_where(|class| class == "5xx")
    }

    fn count_where(&self, keep: impl Fn(&str) -> bool) -> u64 {
        let mut total = 0u64;
        for family in self.inner.http_requests_total.collect() {
            for metric in family.get_metric() {
                let class = metric
                    .get_label()
                    .iter()
                    .find(|label| label.get_name() == "status_class")
                    .map(|label| label.get_value())
                    .unwrap_or_default();
                if keep(class) {
                    total += metric.get_counter().get_value() as u64;
                }
            }
        }
        total
    }

    fn record_request(&self, method: &str, route: &str, status: StatusCode, duration_secs: f64) {
        self.inner
            .http_requests_total
            .with_label_values(&[method, route, status_class(status)])
            .inc();
        self.inner
            .http_request_duration_seconds
            .with_label_values(&[method, route])
            .observe(duration_secs);
    }

    /// Gather all metrics and encode them in the Prometheus text format.
    pub fn gather_and_encode(&self) -> Result<String, String> {
        let encoder = TextEncoder::new();
        let families = self.inner.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&families, &mut buffer)
            .map_err(|e| format!("failed to encode metrics: {e}"))?;
        String::from_utf8(buffer).map_err(|e| format!("metrics encoding produced invalid UTF-8: {e}"))
    }
}

impl Default for ApiMetrics {
    fn default() -> Self {
        Self::new()
    }
}

fn status_class(status: StatusCode) -> &'static str {
    match status.as_u16() {
        100..=199 => "1xx",
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        _ => "5xx",
    }
}

/// Middleware that records request counts and latency.
///
/// The route label is the matched route template, so query strings and
/// unknown paths never create new label values.
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let metrics = request.extensions().get::<ApiMetrics>().cloned();
    let method = request.method().to_string();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_ROUTE.to_string());
    let start = Instant::now();

    let response = next.run(request).await;

    if let Some(m) = metrics {
        m.record_request(&method, &route, response.status(), start.elapsed().as_secs_f64());
    }

    response
}

/// GET /metrics: Prometheus scrape endpoint.
pub async fn metrics_handler(Extension(metrics): Extension<ApiMetrics>) -> Response {
    match metrics.gather_and_encode() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, TextEncoder::new().format_type().to_string())],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "metrics encoding failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e).into_response()
        }
    }
}
