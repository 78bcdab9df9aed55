//! Error taxonomy for the bootstrap layer.
//!
//! Nothing in this crate recovers from these locally: every failure aborts the
//! current build and reaches the caller with the path, node or organization
//! that caused it.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::loader::ConfigError;

/// Errors that can occur while bootstrapping identity or channel.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Keystore directory is missing or cannot be listed.
    #[error("Keystore directory {path:?} is unreadable (does it exist?): {source}")]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Keystore directory does not hold exactly one private key.
    #[error("Expected exactly 1 private key file in {path:?} but found {count}")]
    AmbiguousKeyMaterial { path: PathBuf, count: usize },

    /// Key file was located but could not be read.
    #[error("Private key file {path:?} is unreadable: {source}")]
    KeyUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// PEM block absent, malformed, or not a PKCS#8 private key.
    #[error("Private key decode failed: {0}")]
    KeyDecode(String),

    /// Key file was read but its contents do not decode.
    #[error("Private key file {path:?} could not be decoded: {reason}")]
    KeyInvalid { path: PathBuf, reason: String },

    /// Certificate could not be read as UTF-8 text.
    #[error("Certificate from {origin} is unreadable: {source}")]
    CertificateUnreadable {
        origin: String,
        #[source]
        source: std::io::Error,
    },

    /// Channel requested with no peers.
    #[error("Channel '{channel}' has no peers configured")]
    EmptyTopology { channel: String },

    /// Node construction or channel initialization failed.
    #[error("Channel bootstrap failed at node '{node}': {reason}")]
    ChannelBootstrapFailed { node: String, reason: String },

    /// Accessor used before the step that populates it.
    #[error("Client context not bootstrapped: no {0} available")]
    NotBootstrapped(&'static str),

    /// Network configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for bootstrap operations.
pub type BootstrapResult<T> = Result<T, BootstrapError>;
