//! Node and channel descriptors.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

/// TLS implementation requested from the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TlsProvider {
    OpenSsl,
    Rustls,
}

impl TlsProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            TlsProvider::OpenSsl => "openssl",
            TlsProvider::Rustls => "rustls",
        }
    }
}

/// Connection negotiation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NegotiationMode {
    Tls,
    Plaintext,
}

impl NegotiationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            NegotiationMode::Tls => "tls",
            NegotiationMode::Plaintext => "plaintext",
        }
    }

    /// URL scheme that goes with this mode.
    pub fn scheme(&self) -> &'static str {
        match self {
            NegotiationMode::Tls => "grpcs",
            NegotiationMode::Plaintext => "grpc",
        }
    }
}

/// Parse a node URL and check it can be dialed under `negotiation`.
pub fn parse_endpoint(raw: &str, negotiation: NegotiationMode) -> Result<Url, String> {
    let url = Url::parse(raw).map_err(|e| format!("'{}': {}", raw, e))?;

    if url.scheme() != negotiation.scheme() {
        return Err(format!(
            "'{}': scheme must be {}:// for {} negotiation",
            raw,
            negotiation.scheme(),
            negotiation.as_str()
        ));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(format!("'{}': missing host", raw));
    }
    if url.port().is_none() {
        return Err(format!("'{}': missing port", raw));
    }
    Ok(url)
}

/// Orderer keep-alive timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeepAlive {
    pub interval: Duration,
    pub timeout: Duration,
}

/// A value in the flat transport property table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    Text(String),
    Bytes(Vec<u8>),
}

/// Per-connection transport security settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportProperties {
    /// PEM file holding the certificate(s) trusted for this node.
    pub certificate_path: PathBuf,
    /// DER certificates loaded from `certificate_path` (TLS only).
    pub trusted_certificates: Vec<Vec<u8>>,
    /// Skip server chain validation. Testing networks only.
    pub accept_unverified_server_certificate: bool,
    /// Host name matched against the server certificate.
    pub hostname_override: String,
    pub tls_provider: TlsProvider,
    pub negotiation: NegotiationMode,
    /// Largest inbound message accepted on the connection, in bytes.
    pub max_inbound_message_size: usize,
    /// Orderer only.
    pub keep_alive: Option<KeepAlive>,
}

impl TransportProperties {
    /// Flatten into the string/bytes table handed to the RPC transport.
    pub fn to_property_map(&self) -> BTreeMap<&'static str, PropertyValue> {
        let mut map = BTreeMap::new();
        map.insert(
            "pem_file",
            PropertyValue::Text(self.certificate_path.display().to_string()),
        );
        if let Some(first) = self.trusted_certificates.first() {
            map.insert("pem_bytes", PropertyValue::Bytes(first.clone()));
        }
        map.insert(
            "trust_server_certificate",
            PropertyValue::Text(self.accept_unverified_server_certificate.to_string()),
        );
        map.insert(
            "hostname_override",
            PropertyValue::Text(self.hostname_override.clone()),
        );
        map.insert("ssl_provider", PropertyValue::Text(self.tls_provider.as_str().to_string()));
        map.insert(
            "negotiation_type",
            PropertyValue::Text(self.negotiation.as_str().to_string()),
        );
        map.insert(
            "max_inbound_message_size",
            PropertyValue::Text(self.max_inbound_message_size.to_string()),
        );
        if let Some(keep_alive) = self.keep_alive {
            map.insert(
                "keep_alive_time_secs",
                PropertyValue::Text(keep_alive.interval.as_secs().to_string()),
            );
            map.insert(
                "keep_alive_timeout_secs",
                PropertyValue::Text(keep_alive.timeout.as_secs().to_string()),
            );
        }
        map
    }
}

/// One organization's peer endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerDescriptor {
    pub name: String,
    pub url: Url,
    pub properties: TransportProperties,
}

/// The ordering service endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrdererDescriptor {
    pub name: String,
    pub url: Url,
    pub properties: TransportProperties,
}

impl OrdererDescriptor {
    pub fn keep_alive(&self) -> Option<KeepAlive> {
        self.properties.keep_alive
    }
}

/// Borrowed view over either node kind.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Peer(&'a PeerDescriptor),
    Orderer(&'a OrdererDescriptor),
}

impl<'a> NodeRef<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            NodeRef::Peer(p) => &p.name,
            NodeRef::Orderer(o) => &o.name,
        }
    }

    pub fn url(&self) -> &'a Url {
        match self {
            NodeRef::Peer(p) => &p.url,
            NodeRef::Orderer(o) => &o.url,
        }
    }

    pub fn properties(&self) -> &'a TransportProperties {
        match self {
            NodeRef::Peer(p) => &p.properties,
            NodeRef::Orderer(o) => &o.properties,
        }
    }

    pub fn role(&self) -> &'static str {
        match self {
            NodeRef::Peer(_) => "peer",
            NodeRef::Orderer(_) => "orderer",
        }
    }
}

/// An initialized channel. Immutable; replace the whole value to change it.
#[derive(Debug, Clone)]
pub struct ChannelDescriptor {
    pub(crate) name: String,
    pub(crate) peers: Vec<Arc<PeerDescriptor>>,
    pub(crate) admin_peers: Vec<Arc<PeerDescriptor>>,
    pub(crate) orderer: Arc<OrdererDescriptor>,
    pub(crate) initialized: bool,
}

impl ChannelDescriptor {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Peers in join order.
    pub fn peers(&self) -> &[Arc<PeerDescriptor>] {
        &self.peers
    }

    /// Peers authorized for administrative queries.
    pub fn admin_peers(&self) -> &[Arc<PeerDescriptor>] {
        &self.admin_peers
    }

    pub fn orderer(&self) -> &Arc<OrdererDescriptor> {
        &self.orderer
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Look up a peer by name.
    pub fn peer(&self, name: &str) -> Option<&Arc<PeerDescriptor>> {
        self.peers.iter().find(|p| p.name == name)
    }
}
