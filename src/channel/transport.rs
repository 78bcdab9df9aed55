//! Seam between channel initialization and the ledger RPC transport.
//!
//! # Responsibilities
//! - Define the handshake contract run against every node at initialization
//! - Provide a TCP reachability handshake for real deployments
//!
//! # Design Decisions
//! - TLS and gRPC negotiation belong to the transport, not this crate
//! - Timeouts here are transport configuration, not cancellation controls

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::channel::descriptor::NodeRef;
use crate::identity::Identity;
use crate::observability::metrics;

/// Why a node handshake failed.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("connect to {addr} failed: {source}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("connect to {addr} timed out after {} seconds", .after.as_secs())]
    Timeout { addr: String, after: Duration },

    #[error("endpoint {0} has no host or port")]
    BadEndpoint(String),

    #[error("handshake rejected: {0}")]
    Rejected(String),
}

/// Performs the per-node handshake during channel initialization.
pub trait NodeTransport: Send + Sync {
    /// Negotiate a connection with `node` as `identity`.
    fn handshake(
        &self,
        node: NodeRef<'_>,
        identity: &Identity,
    ) -> impl Future<Output = Result<(), TransportError>> + Send;
}

/// Handshake that proves each endpoint accepts TCP connections.
#[derive(Debug, Clone)]
pub struct TcpHandshake {
    connect_timeout: Duration,
}

impl TcpHandshake {
    pub fn new(connect_timeout: Duration) -> Self {
        Self { connect_timeout }
    }
}

impl NodeTransport for TcpHandshake {
    async fn handshake(&self, node: NodeRef<'_>, identity: &Identity) -> Result<(), TransportError> {
        let url = node.url();
        // IPv6 literals keep their brackets here, which `TcpStream::connect`
        // parses as a socket address rather than a host to resolve.
        let addr = match (url.host_str(), url.port()) {
            (Some(host), Some(port)) => format!("{}:{}", host, port),
            _ => return Err(TransportError::BadEndpoint(url.to_string())),
        };

        let result = match timeout(self.connect_timeout, TcpStream::connect(addr.as_str())).await {
            Ok(Ok(_stream)) => Ok(()),
            Ok(Err(source)) => Err(TransportError::Connect { addr: addr.clone(), source }),
            Err(_) => Err(TransportError::Timeout {
                addr: addr.clone(),
                after: self.connect_timeout,
            }),
        };

        metrics::record_node_handshake(node.name(), result.is_ok());
        match &result {
            Ok(()) => tracing::debug!(
                node = %node.name(),
                role = node.role(),
                addr = %addr,
                msp_id = %identity.msp_id,
                negotiation = node.properties().negotiation.as_str(),
                "Node handshake succeeded"
            ),
            Err(e) => tracing::warn!(node = %node.name(), addr = %addr, error = %e, "Node handshake failed"),
        }
        result
    }
}
