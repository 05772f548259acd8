//! Metrics collection and exposition.
//!
//! # Metrics
//! - `router_dispatch_total` (counter): requests offered to the router, by outcome
//! - `router_lookup_duration_seconds` (histogram): time spent in the route table
//!
//! Recording is a no-op until [`init_metrics`] installs a recorder.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// What the router did with a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A route matched and its handler produced the response.
    Matched,
    /// No route matched; the request went to the next stage.
    Fallthrough,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Matched => "matched",
            Outcome::Fallthrough => "fallthrough",
        }
    }
}

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    let builder = PrometheusBuilder::new().with_http_listener(addr);

    match builder.install() {
        Ok(()) => tracing::info!(address = %addr, "Prometheus metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install Prometheus metrics exporter"),
    }
}

/// Count one request by dispatch outcome.
pub fn record_dispatch(outcome: Outcome) {
    metrics::counter!("router_dispatch_total", "outcome" => outcome.as_str()).increment(1);
}

/// Record the duration of a route table lookup that began at `started`.
pub fn record_lookup(started: Instant) {
    metrics::histogram!("router_lookup_duration_seconds").record(started.elapsed().as_secs_f64());
}
