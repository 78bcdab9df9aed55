//! The client handle: current identity plus node and channel factories.

use std::sync::Arc;

use arc_swap::ArcSwapOption;

use crate::channel::descriptor::{parse_endpoint, OrdererDescriptor, PeerDescriptor, TransportProperties};
use crate::channel::descriptor::NegotiationMode;
use crate::channel::pending::PendingChannel;
use crate::error::{BootstrapError, BootstrapResult};
use crate::identity::Identity;

/// Client handle through which nodes and channels are created.
///
/// The user context is swappable at any time; readers get a consistent
/// snapshot without locking.
#[derive(Debug, Default)]
pub struct ClientHandle {
    user_context: ArcSwapOption<Identity>,
}

impl ClientHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the identity requests are made under.
    pub fn set_user_context(&self, identity: Identity) {
        self.user_context.store(Some(Arc::new(identity)));
    }

    /// Current identity, if one has been attached.
    pub fn user_context(&self) -> Option<Arc<Identity>> {
        self.user_context.load_full()
    }

    /// Start a new, empty channel.
    pub fn new_channel(&self, name: &str) -> PendingChannel {
        PendingChannel::new(name)
    }

    /// Construct a peer descriptor.
    pub fn new_peer(
        &self,
        name: &str,
        url: &str,
        properties: TransportProperties,
    ) -> BootstrapResult<PeerDescriptor> {
        let (url, properties) = prepare_node(name, url, properties)?;
        tracing::debug!(node = %name, url = %url, role = "peer", "Node constructed");
        Ok(PeerDescriptor {
            name: name.to_string(),
            url,
            properties,
        })
    }

    /// Construct the orderer descriptor. Its properties must carry keep-alive.
    pub fn new_orderer(
        &self,
        name: &str,
        url: &str,
        properties: TransportProperties,
    ) -> BootstrapResult<OrdererDescriptor> {
        if properties.keep_alive.is_none() {
            return Err(node_failed(name, "orderer requires keep-alive settings".to_string()));
        }
        let (url, properties) = prepare_node(name, url, properties)?;
        tracing::debug!(node = %name, url = %url, role = "orderer", "Node constructed");
        Ok(OrdererDescriptor {
            name: name.to_string(),
            url,
            properties,
        })
    }
}

fn node_failed(node: &str, reason: String) -> BootstrapError {
    BootstrapError::ChannelBootstrapFailed {
        node: node.to_string(),
        reason,
    }
}

/// Validate the endpoint and, under TLS, load the trusted certificates.
fn prepare_node(
    name: &str,
    url: &str,
    mut properties: TransportProperties,
) -> BootstrapResult<(url::Url, TransportProperties)> {
    let url = parse_endpoint(url, properties.negotiation).map_err(|reason| node_failed(name, reason))?;

    if properties.negotiation == NegotiationMode::Tls {
        let pem = std::fs::read(&properties.certificate_path).map_err(|e| {
            node_failed(
                name,
                format!("TLS certificate {:?} unreadable: {}", properties.certificate_path, e),
            )
        })?;

        let certs = rustls_pemfile::certs(&mut pem.as_slice())
            .map(|cert| cert.map(|der| der.to_vec()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| {
                node_failed(
                    name,
                    format!("TLS certificate {:?} malformed: {}", properties.certificate_path, e),
                )
            })?;
        if certs.is_empty() {
            return Err(node_failed(
                name,
                format!("no certificate in {:?}", properties.certificate_path),
            ));
        }
        properties.trusted_certificates = certs;
    }

    Ok((url, properties))
}
