//! Bootstrap client for a permissioned ledger network.
//!
//! Loads an organization admin's key and certificate, attaches the resulting
//! identity to a process-wide client context, and assembles a channel of
//! peers plus one orderer with per-node transport security settings.

pub mod channel;
pub mod client;
pub mod config;
pub mod error;
pub mod identity;
pub mod keystore;
pub mod lifecycle;
pub mod observability;

pub use channel::{ChannelBuilder, ChannelDescriptor, NodeTransport, TcpHandshake};
pub use client::{ClientContext, ClientHandle};
pub use config::NetworkConfig;
pub use error::{BootstrapError, BootstrapResult};
pub use identity::{build_identity, CertificateSource, Identity};
