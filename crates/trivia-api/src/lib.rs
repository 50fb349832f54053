//! # trivia-api — Axum API Service for the Trivia Stack
//!
//! Serves the trivia catalog over HTTP for the presentation front ends.
//! The server is stateless apart from the catalog source: every request
//! loads the catalog, filters, shuffles, and returns.
//!
//! ## API Surface
//!
//! | Route                  | Module                 | Purpose                      |
//! |------------------------|------------------------|------------------------------|
//! | `GET /api/trivia`      | [`routes::trivia`]     | Filtered, shuffled items     |
//! | `GET /api/countries`   | [`routes::catalog`]    | Country options              |
//! | `GET /api/periods`     | [`routes::catalog`]    | Period options               |
//! | `GET /openapi.json`    | [`openapi`]            | OpenAPI document             |
//! | `GET /metrics`         | [`middleware::metrics`]| Prometheus scrape            |
//! | `GET /health/*`        | this module            | Liveness/readiness probes    |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → CorsLayer → MetricsMiddleware → Handler
//! ```

pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware::from_fn;
use axum::routing::get;
use axum::Router;

use crate::middleware::metrics::ApiMetrics;

pub use error::AppError;
pub use state::{AppConfig, AppState};

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    app_with_metrics(state, ApiMetrics::new())
}

/// Like [`app`], sharing the given counters.
pub fn app_with_metrics(state: AppState, metrics: ApiMetrics) -> Router {
    let api = Router::new()
        .merge(routes::trivia::router())
        .merge(routes::catalog::router())
        .merge(openapi::router())
        .route("/metrics", get(middleware::metrics::metrics_handler));

    let health = Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness));

    Router::new()
        .merge(health)
        .merge(api)
        .layer(from_fn(middleware::metrics::metrics_middleware))
        .layer(middleware::tracing_layer::cors())
        .layer(middleware::tracing_layer::layer())
        .layer(axum::Extension(metrics))
        .with_state(state)
}

/// Liveness probe: always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe: 200 once the catalog loads, 503 otherwise.
async fn readiness(State(state): State<AppState>) -> (StatusCode, &'static str) {
    match state.load_catalog().await {
        Ok(_) => (StatusCode::OK, "ready"),
        Err(err) => {
            tracing::warn!(error = %err, "catalog not loadable");
            (StatusCode::SERVICE_UNAVAILABLE, "catalog unavailable")
        }
    }
}
