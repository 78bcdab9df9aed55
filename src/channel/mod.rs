//! Channel topology subsystem.
//!
//! # Data Flow
//! ```text
//! PeerTarget[] + OrdererTarget + TransportConfig
//!     → builder.rs (transport properties per node)
//!     → ClientHandle::new_peer / new_orderer (URL + TLS trust material)
//!     → pending.rs (append-only, join order preserved)
//!     → transport.rs (handshake every node as the current identity)
//!     → descriptor.rs (initialized, immutable ChannelDescriptor)
//! ```
//!
//! # Design Decisions
//! - A pending channel becomes a descriptor only through initialization
//! - Descriptors are shared via Arc and never mutated
//! - The admin/all-peer partition is static configuration

pub mod builder;
pub mod descriptor;
pub mod pending;
pub mod transport;

pub use builder::{ChannelBuilder, OrdererTarget, PeerTarget};
pub use descriptor::{
    ChannelDescriptor, KeepAlive, NegotiationMode, NodeRef, OrdererDescriptor, PeerDescriptor,
    TlsProvider, TransportProperties,
};
pub use pending::PendingChannel;
pub use transport::{NodeTransport, TcpHandshake, TransportError};
