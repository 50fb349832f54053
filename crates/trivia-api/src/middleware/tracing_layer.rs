//! # Request/Response Tracing
//!
//! Configures `tower_http::trace::TraceLayer` for structured request
//! logging, plus the CORS policy that lets a browser front end on another
//! origin call the read-only endpoints.

use axum::http::Method;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Build a `TraceLayer` for the trivia API.
///
/// Each request gets an INFO span with method and URI; the response is
/// logged with status and latency.
pub fn layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO))
}

/// Every endpoint is a public GET.
pub fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layers_construct_without_panic() {
        let _trace = layer();
        let _cors = cors();
    }
}
