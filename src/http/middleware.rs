//! Request accounting middleware.

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use std::time::Instant;

use crate::observability::metrics;
use crate::routing::matcher::classify;

/// Record count and latency per route class.
pub async fn track_requests(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let class = classify(request.uri().path());
    let method = request.method().clone();

    let response = next.run(request).await;

    metrics::record_request(class.as_str(), method.as_str(), response.status().as_u16(), start);
    response
}
