//! Configuration schema definitions.
//!
//! This module defines the complete network description for the bootstrap
//! client. All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::channel::builder::{OrdererTarget, PeerTarget};
use crate::channel::descriptor::{NegotiationMode, TlsProvider};
use crate::identity::{CertificateSource, CryptoLayout};

/// Root configuration for the bootstrap client.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct NetworkConfig {
    /// Channel to assemble.
    pub channel: ChannelConfig,

    /// Location of the `crypto-config` tree.
    pub crypto: CryptoLayout,

    /// Identity used for the initial bootstrap.
    pub identity: IdentityConfig,

    /// Transport defaults applied to every node.
    pub transport: TransportConfig,

    /// Peers, in join order.
    pub peers: Vec<PeerConfig>,

    /// The single ordering node.
    pub orderer: OrdererConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Channel configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ChannelConfig {
    /// Channel name shared by all participants.
    pub name: String,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            name: "pharmachannel".to_string(),
        }
    }
}

/// Bootstrap identity configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct IdentityConfig {
    /// Organization short name (MSP id is `<organization>MSP`).
    pub organization: String,

    /// Keystore override; derived from the crypto layout when absent.
    pub keystore: Option<PathBuf>,

    /// Signing certificate override; derived from the crypto layout when absent.
    pub certificate: Option<PathBuf>,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            organization: "manufacturer".to_string(),
            keystore: None,
            certificate: None,
        }
    }
}

/// Transport properties shared by all nodes.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Accept the server certificate without chain validation.
    /// Testing networks only.
    pub accept_unverified_server_certificate: bool,

    /// TLS implementation requested from the transport.
    pub tls_provider: TlsProvider,

    /// TLS or plaintext negotiation.
    pub negotiation: NegotiationMode,

    /// Maximum inbound message size in bytes, per connection.
    pub max_inbound_message_size: usize,

    /// Orderer keep-alive ping interval in seconds.
    pub keep_alive_interval_secs: u64,

    /// Orderer keep-alive timeout in seconds.
    pub keep_alive_timeout_secs: u64,

    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            accept_unverified_server_certificate: true,
            tls_provider: TlsProvider::OpenSsl,
            negotiation: NegotiationMode::Tls,
            max_inbound_message_size: 9_000_000,
            keep_alive_interval_secs: 300,
            keep_alive_timeout_secs: 8,
            connect_timeout_secs: 5,
        }
    }
}

impl TransportConfig {
    pub fn keep_alive_interval(&self) -> Duration {
        Duration::from_secs(self.keep_alive_interval_secs)
    }

    pub fn keep_alive_timeout(&self) -> Duration {
        Duration::from_secs(self.keep_alive_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// Peer node configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PeerConfig {
    /// Peer host name (e.g., "peer0.fda.state.com").
    pub name: String,

    /// Endpoint URL (e.g., "grpcs://localhost:8051").
    pub url: String,

    /// Owning organization short name.
    pub organization: String,

    /// TLS server certificate; derived from the crypto layout when absent.
    #[serde(default)]
    pub tls_cert: Option<PathBuf>,

    /// Host name expected in the server certificate (default: `name`).
    #[serde(default)]
    pub hostname_override: Option<String>,

    /// Receives administrative queries (chaincode lifecycle).
    #[serde(default)]
    pub admin: bool,
}

/// Orderer node configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OrdererConfig {
    /// Orderer host name.
    pub name: String,

    /// Endpoint URL.
    pub url: String,

    /// TLS server certificate; derived from the crypto layout when absent.
    pub tls_cert: Option<PathBuf>,

    /// Host name expected in the server certificate (default: `name`).
    pub hostname_override: Option<String>,
}

impl Default for OrdererConfig {
    fn default() -> Self {
        Self {
            name: "orderer.state.com".to_string(),
            url: "grpcs://localhost:7050".to_string(),
            tls_cert: None,
            hostname_override: None,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

impl NetworkConfig {
    /// Keystore directory of the bootstrap identity.
    pub fn bootstrap_keystore(&self) -> PathBuf {
        match &self.identity.keystore {
            Some(path) => self.crypto.resolve(path),
            None => self.crypto.admin_keystore(&self.identity.organization),
        }
    }

    /// Signing certificate of the bootstrap identity.
    pub fn bootstrap_certificate(&self) -> CertificateSource {
        let path = match &self.identity.certificate {
            Some(path) => self.crypto.resolve(path),
            None => self.crypto.admin_signcert(&self.identity.organization),
        };
        CertificateSource::File(path)
    }

    /// Peer targets in join order, with layout-derived defaults filled in.
    pub fn peer_targets(&self) -> Vec<PeerTarget> {
        self.peers
            .iter()
            .map(|peer| PeerTarget {
                name: peer.name.clone(),
                url: peer.url.clone(),
                tls_cert: match &peer.tls_cert {
                    Some(path) => self.crypto.resolve(path),
                    None => self.crypto.peer_tls_cert(&peer.organization, &peer.name),
                },
                hostname_override: peer
                    .hostname_override
                    .clone()
                    .unwrap_or_else(|| peer.name.clone()),
                admin: peer.admin,
            })
            .collect()
    }

    /// Orderer target with layout-derived defaults filled in.
    pub fn orderer_target(&self) -> OrdererTarget {
        let orderer = &self.orderer;
        OrdererTarget {
            name: orderer.name.clone(),
            url: orderer.url.clone(),
            tls_cert: match &orderer.tls_cert {
                Some(path) => self.crypto.resolve(path),
                None => self.crypto.orderer_tls_cert(&orderer.name),
            },
            hostname_override: orderer
                .hostname_override
                .clone()
                .unwrap_or_else(|| orderer.name.clone()),
        }
    }
}
