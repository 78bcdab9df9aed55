//! Channel topology assembly.
//!
//! # Responsibilities
//! - Turn peer/orderer targets into descriptors with transport properties
//! - Add nodes in order and initialize the channel
//! - Partition peers into admin peers and all peers
//!
//! # Design Decisions
//! - Fail fast: the first failing node aborts the whole build
//! - No retries; a failed channel is dropped, never partially exposed

use std::path::{Path, PathBuf};

use crate::channel::descriptor::{ChannelDescriptor, KeepAlive, TransportProperties};
use crate::channel::transport::NodeTransport;
use crate::client::handle::ClientHandle;
use crate::config::schema::TransportConfig;
use crate::error::{BootstrapError, BootstrapResult};
use crate::observability::metrics;

/// Everything needed to construct one peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerTarget {
    pub name: String,
    pub url: String,
    /// PEM trusted for the peer's TLS server certificate.
    pub tls_cert: PathBuf,
    pub hostname_override: String,
    /// Peer receives administrative queries.
    pub admin: bool,
}

/// Everything needed to construct the orderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrdererTarget {
    pub name: String,
    pub url: String,
    pub tls_cert: PathBuf,
    pub hostname_override: String,
}

/// Builds channels through an authenticated client handle.
pub struct ChannelBuilder<'a, T> {
    client: &'a ClientHandle,
    transport: &'a T,
    defaults: &'a TransportConfig,
}

impl<'a, T: NodeTransport> ChannelBuilder<'a, T> {
    pub fn new(client: &'a ClientHandle, transport: &'a T, defaults: &'a TransportConfig) -> Self {
        Self {
            client,
            transport,
            defaults,
        }
    }

    fn properties(&self, tls_cert: &Path, hostname_override: &str) -> TransportProperties {
        TransportProperties {
            certificate_path: tls_cert.to_path_buf(),
            trusted_certificates: Vec::new(),
            accept_unverified_server_certificate: self.defaults.accept_unverified_server_certificate,
            hostname_override: hostname_override.to_string(),
            tls_provider: self.defaults.tls_provider,
            negotiation: self.defaults.negotiation,
            max_inbound_message_size: self.defaults.max_inbound_message_size,
            keep_alive: None,
        }
    }

    /// Assemble and initialize `channel_name`.
    ///
    /// Peers join in the order given, then the orderer, then every node is
    /// handshaken. An empty peer list fails before any I/O.
    pub async fn build_channel(
        &self,
        channel_name: &str,
        peers: &[PeerTarget],
        orderer: &OrdererTarget,
    ) -> BootstrapResult<ChannelDescriptor> {
        if peers.is_empty() {
            return Err(BootstrapError::EmptyTopology {
                channel: channel_name.to_string(),
            });
        }
        let identity = self
            .client
            .user_context()
            .ok_or(BootstrapError::NotBootstrapped("identity"))?;

        tracing::info!(
            channel = %channel_name,
            peers = peers.len(),
            msp_id = %identity.msp_id,
            "Building channel"
        );

        let mut channel = self.client.new_channel(channel_name);
        for target in peers {
            let peer = self.client.new_peer(
                &target.name,
                &target.url,
                self.properties(&target.tls_cert, &target.hostname_override),
            )?;
            channel.add_peer(peer, target.admin);
        }

        let mut orderer_properties = self.properties(&orderer.tls_cert, &orderer.hostname_override);
        orderer_properties.keep_alive = Some(KeepAlive {
            interval: self.defaults.keep_alive_interval(),
            timeout: self.defaults.keep_alive_timeout(),
        });
        channel.add_orderer(self.client.new_orderer(&orderer.name, &orderer.url, orderer_properties)?)?;

        let descriptor = channel.initialize(self.transport, &identity).await?;
        metrics::record_channel_peers(descriptor.peers().len());
        Ok(descriptor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::descriptor::NegotiationMode;
    use crate::channel::transport::testing::RecordingTransport;
    use crate::identity::{Enrollment, Identity, ADMIN_PRINCIPAL};
    use crate::keystore::parse_private_key;

    const ADMIN_KEY: &str = include_str!("../../tests/fixtures/admin_key.pem");

    fn identity(org: &str) -> Identity {
        Identity {
            msp_id: format!("{}MSP", org),
            display_name: ADMIN_PRINCIPAL.to_string(),
            enrollment: Enrollment {
                private_key: parse_private_key(ADMIN_KEY.as_bytes()).unwrap(),
                certificate_pem: String::new(),
            },
        }
    }

    fn plaintext() -> TransportConfig {
        TransportConfig {
            negotiation: NegotiationMode::Plaintext,
            ..Default::default()
        }
    }

    fn peer(name: &str, port: u16, admin: bool) -> PeerTarget {
        PeerTarget {
            name: name.to_string(),
            url: format!("grpc://127.0.0.1:{}", port),
            tls_cert: PathBuf::from("unused.crt"),
            hostname_override: name.to_string(),
            admin,
        }
    }

    fn orderer() -> OrdererTarget {
        OrdererTarget {
            name: "orderer.state.com".to_string(),
            url: "grpc://127.0.0.1:7050".to_string(),
            tls_cert: PathBuf::from("unused.crt"),
            hostname_override: "orderer.state.com".to_string(),
        }
    }

    fn client() -> ClientHandle {
        let client = ClientHandle::new();
        client.set_user_context(identity("manufacturer"));
        client
    }

    #[tokio::test]
    async fn test_build_channel() {
        let client = client();
        let transport = RecordingTransport::default();
        let defaults = plaintext();
        let builder = ChannelBuilder::new(&client, &transport, &defaults);

        let peers = [peer("peerA", 7051, false), peer("peerB", 9051, true)];
        let channel = builder.build_channel("pharmachannel", &peers, &orderer()).await.unwrap();

        assert_eq!(channel.name(), "pharmachannel");
        assert!(channel.is_initialized());
        let names: Vec<_> = channel.peers().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["peerA", "peerB"]);
        assert_eq!(channel.admin_peers().len(), 1);
        assert_eq!(channel.admin_peers()[0].name, "peerB");
        assert_eq!(channel.orderer().name, "orderer.state.com");

        assert_eq!(transport.nodes(), vec!["peerA", "peerB", "orderer.state.com"]);
        let calls = transport.calls.lock().unwrap();
        assert!(calls.iter().all(|(_, msp)| msp == "manufacturerMSP"));
    }

    #[tokio::test]
    async fn test_transport_properties_applied() {
        let client = client();
        let transport = RecordingTransport::default();
        let defaults = plaintext();
        let builder = ChannelBuilder::new(&client, &transport, &defaults);

        let channel = builder
            .build_channel("pharmachannel", &[peer("peerA", 7051, false)], &orderer())
            .await
            .unwrap();

        let props = &channel.peers()[0].properties;
        assert_eq!(props.max_inbound_message_size, 9_000_000);
        assert!(props.accept_unverified_server_certificate);
        assert_eq!(props.hostname_override, "peerA");
        assert!(props.keep_alive.is_none());

        let keep_alive = channel.orderer().keep_alive().unwrap();
        assert_eq!(keep_alive.interval.as_secs(), 300);
        assert_eq!(keep_alive.timeout.as_secs(), 8);
    }

    #[tokio::test]
    async fn test_empty_topology_does_no_io() {
        let client = client();
        let transport = RecordingTransport::default();
        let defaults = plaintext();
        let builder = ChannelBuilder::new(&client, &transport, &defaults);

        let err = builder.build_channel("pharmachannel", &[], &orderer()).await.unwrap_err();
        assert!(matches!(err, BootstrapError::EmptyTopology { ref channel } if channel == "pharmachannel"));
        assert!(transport.nodes().is_empty());
    }

    #[tokio::test]
    async fn test_requires_identity() {
        let client = ClientHandle::new();
        let transport = RecordingTransport::default();
        let defaults = plaintext();
        let builder = ChannelBuilder::new(&client, &transport, &defaults);

        let err = builder
            .build_channel("pharmachannel", &[peer("peerA", 7051, false)], &orderer())
            .await
            .unwrap_err();
        assert!(matches!(err, BootstrapError::NotBootstrapped("identity")));
    }

    #[tokio::test]
    async fn test_handshake_failure_names_node() {
        let client = client();
        let transport = RecordingTransport::failing_at("peerB");
        let defaults = plaintext();
        let builder = ChannelBuilder::new(&client, &transport, &defaults);

        let peers = [peer("peerA", 7051, false), peer("peerB", 9051, false), peer("peerC", 10051, false)];
        let err = builder.build_channel("pharmachannel", &peers, &orderer()).await.unwrap_err();

        match err {
            BootstrapError::ChannelBootstrapFailed { node, reason } => {
                assert_eq!(node, "peerB");
                assert!(reason.contains("access denied"));
            }
            other => panic!("unexpected error: {other}"),
        }
        // No retries, no further nodes.
        assert_eq!(transport.nodes(), vec!["peerA", "peerB"]);
    }

    #[tokio::test]
    async fn test_construction_failure_skips_handshake() {
        let client = client();
        let transport = RecordingTransport::default();
        let defaults = plaintext();
        let builder = ChannelBuilder::new(&client, &transport, &defaults);

        let mut bad = peer("peerB", 9051, false);
        bad.url = "grpc://127.0.0.1".to_string();
        let err = builder
            .build_channel("pharmachannel", &[peer("peerA", 7051, false), bad], &orderer())
            .await
            .unwrap_err();

        assert!(matches!(err, BootstrapError::ChannelBootstrapFailed { ref node, .. } if node == "peerB"));
        assert!(transport.nodes().is_empty());
    }
}
