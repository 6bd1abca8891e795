//! Metrics collection and exposition.
//!
//! # Metrics
//! - `proxy_requests_total` (counter): requests by method and outcome
//! - `proxy_request_duration_seconds` (histogram): end-to-end handler latency
//!
//! Recording goes through the `metrics` facade and is a no-op until an
//! exporter is installed, so handlers record unconditionally.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Outcome label for a request that produced a snapshot body.
pub const OUTCOME_OK: &str = "ok";

/// Outcome label for a snapshot that could not be serialized.
pub const OUTCOME_ENCODE_ERROR: &str = "encode_error";

/// Install the Prometheus exporter with an HTTP scrape listener on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Method label for the request counter.
///
/// Standard methods keep their name; anything else a client sends collapses
/// to `other` so the label set stays bounded.
pub fn method_label(method: &str) -> &'static str {
    match method {
        "GET" => "GET",
        "POST" => "POST",
        "PUT" => "PUT",
        "DELETE" => "DELETE",
        "HEAD" => "HEAD",
        "OPTIONS" => "OPTIONS",
        "CONNECT" => "CONNECT",
        "PATCH" => "PATCH",
        "TRACE" => "TRACE",
        _ => "other",
    }
}

/// Record one handled request.
pub fn record_request(method: &str, outcome: &'static str, start_time: Instant) {
    let elapsed = start_time.elapsed().as_secs_f64();

    metrics::counter!(
        "proxy_requests_total",
        "method" => method_label(method),
        "outcome" => outcome
    )
    .increment(1);
    metrics::histogram!("proxy_request_duration_seconds", "outcome" => outcome).record(elapsed);
}
