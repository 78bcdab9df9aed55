//! Startup orchestration.
//!
//! # Responsibilities
//! - Start the metrics endpoint when enabled
//! - Bootstrap the process-wide client context from configuration
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The default transport is a TCP handshake bounded by the configured
//!   connect timeout

use std::sync::Arc;

use crate::channel::descriptor::ChannelDescriptor;
use crate::channel::transport::TcpHandshake;
use crate::client::ClientContext;
use crate::config::NetworkConfig;
use crate::error::BootstrapResult;
use crate::observability::metrics;

/// Transport built from the configuration's connect timeout.
pub fn default_transport(config: &NetworkConfig) -> TcpHandshake {
    TcpHandshake::new(config.transport.connect_timeout())
}

/// Start optional subsystems that only need configuration.
pub fn start_observability(config: &NetworkConfig) {
    let observability = &config.observability;
    if !observability.metrics_enabled {
        return;
    }
    match observability.metrics_address.parse() {
        Ok(addr) => metrics::init_metrics(addr),
        Err(_) => tracing::error!(
            metrics_address = %observability.metrics_address,
            "Failed to parse metrics address"
        ),
    }
}

/// Bootstrap `context` against the network described by `config`.
pub async fn bootstrap(
    context: &ClientContext,
    config: &NetworkConfig,
) -> BootstrapResult<Arc<ChannelDescriptor>> {
    let transport = default_transport(config);
    let channel = context.ensure_bootstrapped(config, &transport).await?;

    tracing::info!(
        channel = %channel.name(),
        peers = channel.peers().len(),
        orderer = %channel.orderer().name,
        "Bootstrap complete"
    );
    Ok(channel)
}
