//! Metrics collection and exposition.
//!
//! # Metrics
//! - `quote_card_requests_total` (counter): requests by route and status
//! - `quote_card_request_duration_seconds` (histogram): latency by route
//! - `quote_card_upstream_failures_total` (counter): failures by error kind
//!
//! Recording is a no-op until `init_metrics` installs the exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a served request.
pub fn record_request(route: &'static str, status: u16, start: Instant) {
    metrics::counter!(
        "quote_card_requests_total",
        "route" => route,
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("quote_card_request_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}

/// Record a failed or unusable upstream response.
pub fn record_upstream_failure(kind: &'static str) {
    metrics::counter!("quote_card_upstream_failures_total", "kind" => kind).increment(1);
}
