//! Keystore subsystem: private-key discovery and decoding.
//!
//! # Data Flow
//! ```text
//! <org>/users/Admin@<org>/msp/keystore/
//!     → locator.rs (find the single *_sk file)
//!     → std::fs::read (scoped, released on every path)
//!     → pem.rs (PEM → PKCS#8 PrivateKeyInfo → PrivateKeyHandle)
//! ```
//!
//! # Design Decisions
//! - Exactly one key per keystore directory; anything else is fatal
//! - Decoding is pure and never panics on hostile input
//! - Key bytes are never logged

pub mod locator;
pub mod pem;

use std::path::Path;

use crate::error::{BootstrapError, BootstrapResult};

pub use locator::{locate_key_file, KEYSTORE_SUFFIX};
pub use pem::{parse_private_key, PrivateKeyHandle};

/// Locate, read and decode the private key held in `dir`.
pub fn load_private_key(dir: &Path) -> BootstrapResult<PrivateKeyHandle> {
    let key_path = locate_key_file(dir)?;
    let bytes = std::fs::read(&key_path).map_err(|source| BootstrapError::KeyUnreadable {
        path: key_path.clone(),
        source,
    })?;

    let key = parse_private_key(&bytes).map_err(|e| match e {
        BootstrapError::KeyDecode(reason) => BootstrapError::KeyInvalid {
            path: key_path.clone(),
            reason,
        },
        other => other,
    })?;
    tracing::debug!(path = ?key_path, algorithm = %key.algorithm(), "Private key loaded");
    Ok(key)
}
