//! Metrics collection and exposition.
//!
//! # Metrics
//! - `forms_proxy_requests_total` (counter): filtered requests by status
//! - `forms_proxy_request_duration_seconds` (histogram): end-to-end latency
//! - `forms_proxy_upstream_duration_seconds` (histogram): forms API latency by status
//! - `forms_proxy_submissions_fetched` (histogram): submissions per upstream listing
//!
//! Recording is a no-op until [`init_metrics`] installs the exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    let builder = PrometheusBuilder::new().with_http_listener(addr);
    match builder.install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a completed request to the filtered endpoint.
pub fn record_request(status: u16, start: Instant) {
    let status = status.to_string();
    counter!("forms_proxy_requests_total", "status" => status).increment(1);
    histogram!("forms_proxy_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

/// Record one upstream call.
pub fn record_upstream(status: &str, start: Instant) {
    histogram!("forms_proxy_upstream_duration_seconds", "status" => status.to_string())
        .record(start.elapsed().as_secs_f64());
}

/// Record how many submissions the upstream returned.
pub fn record_fetched(count: usize) {
    histogram!("forms_proxy_submissions_fetched").record(count as f64);
}
