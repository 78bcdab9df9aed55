//! Metrics collection and exposition.
//!
//! # Metrics
//! - `ledger_bootstrap_attempts_total` (counter): channel builds by outcome
//! - `ledger_identity_swaps_total` (counter): identities attached, by MSP id
//! - `ledger_node_handshake_total` (counter): handshakes by node and outcome
//! - `ledger_channel_peers` (gauge): peers in the current channel

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint started"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to start metrics endpoint"),
    }
}

/// Record the outcome of a channel build.
pub fn record_bootstrap(outcome: &'static str) {
    metrics::counter!("ledger_bootstrap_attempts_total", "outcome" => outcome).increment(1);
}

/// Record an identity being attached to the client.
pub fn record_identity_swap(msp_id: &str) {
    metrics::counter!("ledger_identity_swaps_total", "msp_id" => msp_id.to_string()).increment(1);
}

/// Record a node handshake.
pub fn record_node_handshake(node: &str, ok: bool) {
    let outcome = if ok { "success" } else { "failure" };
    metrics::counter!(
        "ledger_node_handshake_total",
        "node" => node.to_string(),
        "outcome" => outcome
    )
    .increment(1);
}

/// Record the peer count of the current channel.
pub fn record_channel_peers(count: usize) {
    metrics::gauge!("ledger_channel_peers").set(count as f64);
}
