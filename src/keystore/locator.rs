//! Keystore directory scanning.

use std::path::{Path, PathBuf};

use crate::error::{BootstrapError, BootstrapResult};

/// File name suffix marking a private-key artifact in an MSP keystore.
pub const KEYSTORE_SUFFIX: &str = "_sk";

/// Find the single private-key file among the immediate children of `dir`.
///
/// Fails with `DirectoryUnreadable` when the directory cannot be listed and
/// with `AmbiguousKeyMaterial` when zero or several key files are present.
pub fn locate_key_file(dir: &Path) -> BootstrapResult<PathBuf> {
    let unreadable = |source| BootstrapError::DirectoryUnreadable {
        path: dir.to_path_buf(),
        source,
    };

    let mut matches = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(unreadable)? {
        let entry = entry.map_err(unreadable)?;
        let is_key = entry
            .file_name()
            .as_encoded_bytes()
            .ends_with(KEYSTORE_SUFFIX.as_bytes());
        if is_key && entry.path().is_file() {
            matches.push(entry.path());
        }
    }

    if matches.len() != 1 {
        return Err(BootstrapError::AmbiguousKeyMaterial {
            path: dir.to_path_buf(),
            count: matches.len(),
        });
    }

    let path = matches.remove(0);
    tracing::debug!(keystore = ?dir, key_file = ?path, "Located private key file");
    Ok(path)
}
