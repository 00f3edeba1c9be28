//! Metrics collection and exposition.
//!
//! # Metrics
//! - `edge_requests_total` (counter): requests by class, method, status
//! - `edge_request_duration_seconds` (histogram): latency by class
//! - `edge_backend_calls_total` (counter): backend calls by outcome
//! - `edge_backend_call_duration_seconds` (histogram): backend latency
//! - `edge_cart_mutations_total` (counter): cart mutations by operation
//! - `edge_cart_active_sessions` (gauge): sessions with a non-empty cart

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus exporter with its own scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(class: &'static str, method: &str, status: u16, start: Instant) {
    counter!(
        "edge_requests_total",
        "class" => class,
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("edge_request_duration_seconds", "class" => class)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_backend_call(outcome: &'static str, start: Instant) {
    counter!("edge_backend_calls_total", "outcome" => outcome).increment(1);
    histogram!("edge_backend_call_duration_seconds").record(start.elapsed().as_secs_f64());
}

pub fn record_cart_mutation(op: &'static str) {
    counter!("edge_cart_mutations_total", "op" => op).increment(1);
}

pub fn record_active_sessions(count: usize) {
    gauge!("edge_cart_active_sessions").set(count as f64);
}
