//! Metrics collection and exposition.
//!
//! # Metrics
//! - `router_resolutions_total` (counter): resolutions by outcome and lookup
//! - `router_resolution_duration_seconds` (histogram): time spent in `resolve`
//! - `router_route_cache_total` (counter): route cache hits and misses
//! - `router_snapshot_nodes` (gauge): nodes in the installed snapshot
//! - `router_snapshot_generation` (gauge): generation of the installed snapshot

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Start the Prometheus scrape endpoint. Must be called inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint started");
    Ok(())
}

pub fn record_resolution(outcome: &'static str, lookup: &'static str, start: Instant) {
    counter!("router_resolutions_total", "outcome" => outcome, "lookup" => lookup).increment(1);
    histogram!("router_resolution_duration_seconds").record(start.elapsed().as_secs_f64());
}

pub fn record_cache_lookup(hit: bool) {
    let result = if hit { "hit" } else { "miss" };
    counter!("router_route_cache_total", "result" => result).increment(1);
}

pub fn record_snapshot(generation: u64, nodes: usize) {
    gauge!("router_snapshot_generation").set(generation as f64);
    gauge!("router_snapshot_nodes").set(nodes as f64);
}
