//! Per-request tracing span.

use axum::{extract::Request, http::Method};
use tower_http::{
    classify::{ServerErrorsAsFailures, SharedClassifier},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

/// Span factory recording method, path and a `request_id` slot that
/// [`request_id_middleware`](super::request_id_middleware) fills in.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestSpan;

impl<B> tower_http::trace::MakeSpan<B> for RequestSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        make_request_span(request.method(), request.uri().path())
    }
}

fn make_request_span(method: &Method, path: &str) -> Span {
    tracing::info_span!(
        "request",
        method = %method,
        path = %path,
        request_id = tracing::field::Empty,
    )
}

/// `TraceLayer` logging one line per response at INFO.
#[must_use]
pub fn trace_layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>, RequestSpan> {
    TraceLayer::new_for_http()
        .make_span_with(RequestSpan)
        .on_response(DefaultOnResponse::new().level(Level::INFO))
}
