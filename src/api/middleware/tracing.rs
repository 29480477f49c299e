//! HTTP request/response tracing middleware.

use axum::extract::MatchedPath;
use axum::http::Request;
use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultOnResponse, MakeSpan, TraceLayer};
use tracing::{Level, Span};

/// Builds the request span with the matched route template.
///
/// The route (`/api/properties/{id}`) groups requests in log queries where
/// the raw URI would not.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteSpan;

impl<B> MakeSpan<B> for RouteSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        let route = request
            .extensions()
            .get::<MatchedPath>()
            .map(MatchedPath::as_str)
            .unwrap_or("-");

        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            route,
        )
    }
}

pub type HttpTraceLayer = TraceLayer<SharedClassifier<ServerErrorsAsFailures>, RouteSpan>;

/// Creates a tracing middleware for HTTP requests.
///
/// # Logging Behavior
///
/// **On Request:** opens an `INFO` span with method, URI and matched route.
///
/// **On Response:** logs status and latency in milliseconds at `INFO`.
/// 5xx responses are additionally reported as failures at `ERROR`.
///
/// # Example Logs
///
/// ```text
/// INFO request{method=POST uri=/api/properties route=/api/properties}: finished processing request latency=14 ms status=201
/// ```
pub fn layer() -> HttpTraceLayer {
    TraceLayer::new_for_http()
        .make_span_with(RouteSpan)
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
}
