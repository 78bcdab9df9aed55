//! Channel under construction.

use std::sync::Arc;

use crate::channel::descriptor::{ChannelDescriptor, NodeRef, OrdererDescriptor, PeerDescriptor};
use crate::channel::transport::NodeTransport;
use crate::error::{BootstrapError, BootstrapResult};
use crate::identity::Identity;

/// A channel that accepts nodes until it is initialized.
///
/// Initialization consumes the pending channel, so a descriptor can never be
/// observed half-built and nodes cannot be added afterwards.
#[derive(Debug)]
pub struct PendingChannel {
    name: String,
    peers: Vec<Arc<PeerDescriptor>>,
    admin_peers: Vec<Arc<PeerDescriptor>>,
    orderer: Option<Arc<OrdererDescriptor>>,
}

impl PendingChannel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            peers: Vec::new(),
            admin_peers: Vec::new(),
            orderer: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append a peer; join order is insertion order.
    pub fn add_peer(&mut self, peer: PeerDescriptor, admin: bool) -> Arc<PeerDescriptor> {
        let peer = Arc::new(peer);
        if admin {
            self.admin_peers.push(peer.clone());
        }
        self.peers.push(peer.clone());
        peer
    }

    /// Set the orderer. A channel has exactly one.
    pub fn add_orderer(&mut self, orderer: OrdererDescriptor) -> BootstrapResult<()> {
        if let Some(existing) = &self.orderer {
            return Err(BootstrapError::ChannelBootstrapFailed {
                node: orderer.name,
                reason: format!("channel already has orderer '{}'", existing.name),
            });
        }
        self.orderer = Some(Arc::new(orderer));
        Ok(())
    }

    /// Handshake every node (peers in join order, then the orderer) and
    /// freeze the channel.
    pub async fn initialize<T: NodeTransport>(
        self,
        transport: &T,
        identity: &Identity,
    ) -> BootstrapResult<ChannelDescriptor> {
        if self.peers.is_empty() {
            return Err(BootstrapError::EmptyTopology { channel: self.name });
        }
        let orderer = self.orderer.ok_or_else(|| BootstrapError::ChannelBootstrapFailed {
            node: self.name.clone(),
            reason: "no orderer configured".to_string(),
        })?;

        let nodes = self
            .peers
            .iter()
            .map(|p| NodeRef::Peer(p.as_ref()))
            .chain(std::iter::once(NodeRef::Orderer(orderer.as_ref())));
        for node in nodes {
            transport
                .handshake(node, identity)
                .await
                .map_err(|e| BootstrapError::ChannelBootstrapFailed {
                    node: node.name().to_string(),
                    reason: e.to_string(),
                })?;
        }

        tracing::info!(
            channel = %self.name,
            peers = self.peers.len(),
            admin_peers = self.admin_peers.len(),
            orderer = %orderer.name,
            "Channel initialized"
        );

        Ok(ChannelDescriptor {
            name: self.name,
            peers: self.peers,
            admin_peers: self.admin_peers,
            orderer,
            initialized: true,
        })
    }
}
