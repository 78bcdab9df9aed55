//! Crypto material layout as produced by Fabric's `cryptogen`.
//!
//! All paths are joined from an externally supplied root, so nothing here
//! depends on the platform separator or the user's home directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Root of a `crypto-config` tree plus the network's DNS domain.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CryptoLayout {
    /// Directory containing `peerOrganizations/` and `ordererOrganizations/`.
    pub root: PathBuf,

    /// Domain shared by all organizations (e.g. "state.com").
    pub domain: String,
}

impl Default for CryptoLayout {
    fn default() -> Self {
        Self {
            root: PathBuf::from("crypto-config"),
            domain: "state.com".to_string(),
        }
    }
}

impl CryptoLayout {
    pub fn new(root: impl Into<PathBuf>, domain: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            domain: domain.into(),
        }
    }

    /// Fully qualified organization name, e.g. `fda.state.com`.
    pub fn org_host(&self, organization: &str) -> String {
        format!("{}.{}", organization, self.domain)
    }

    /// Administrative principal of an organization, e.g. `Admin@fda.state.com`.
    pub fn admin_principal(&self, organization: &str) -> String {
        format!("Admin@{}", self.org_host(organization))
    }

    fn peer_org_dir(&self, organization: &str) -> PathBuf {
        self.root
            .join("peerOrganizations")
            .join(self.org_host(organization))
    }

    fn admin_msp_dir(&self, organization: &str) -> PathBuf {
        self.peer_org_dir(organization)
            .join("users")
            .join(self.admin_principal(organization))
            .join("msp")
    }

    /// Keystore directory of the organization's admin.
    pub fn admin_keystore(&self, organization: &str) -> PathBuf {
        self.admin_msp_dir(organization).join("keystore")
    }

    /// Signing certificate of the organization's admin.
    pub fn admin_signcert(&self, organization: &str) -> PathBuf {
        self.admin_msp_dir(organization)
            .join("signcerts")
            .join(format!("{}-cert.pem", self.admin_principal(organization)))
    }

    /// TLS server certificate of a peer.
    pub fn peer_tls_cert(&self, organization: &str, peer_host: &str) -> PathBuf {
        self.peer_org_dir(organization)
            .join("peers")
            .join(peer_host)
            .join("tls")
            .join("server.crt")
    }

    /// TLS server certificate of an orderer.
    pub fn orderer_tls_cert(&self, orderer_host: &str) -> PathBuf {
        self.root
            .join("ordererOrganizations")
            .join(&self.domain)
            .join("orderers")
            .join(orderer_host)
            .join("tls")
            .join("server.crt")
    }

    /// Resolve a path from configuration: absolute paths pass through,
    /// relative ones are taken from the layout root.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> CryptoLayout {
        CryptoLayout::new("/opt/crypto-config", "state.com")
    }

    #[test]
    fn test_admin_paths() {
        let layout = layout();
        assert_eq!(
            layout.admin_keystore("manufacturer"),
            Path::new("/opt/crypto-config/peerOrganizations/manufacturer.state.com/users/Admin@manufacturer.state.com/msp/keystore")
        );
        assert_eq!(
            layout.admin_signcert("fda"),
            Path::new("/opt/crypto-config/peerOrganizations/fda.state.com/users/Admin@fda.state.com/msp/signcerts/Admin@fda.state.com-cert.pem")
        );
    }

    #[test]
    fn test_tls_paths() {
        let layout = layout();
        assert_eq!(
            layout.peer_tls_cert("medic", "peer0.medic.state.com"),
            Path::new("/opt/crypto-config/peerOrganizations/medic.state.com/peers/peer0.medic.state.com/tls/server.crt")
        );
        assert_eq!(
            layout.orderer_tls_cert("orderer.state.com"),
            Path::new("/opt/crypto-config/ordererOrganizations/state.com/orderers/orderer.state.com/tls/server.crt")
        );
    }

    #[test]
    fn test_resolve() {
        let layout = layout();
        assert_eq!(
            layout.resolve(Path::new("extra/ca.pem")),
            Path::new("/opt/crypto-config/extra/ca.pem")
        );
        assert_eq!(layout.resolve(Path::new("/etc/ca.pem")), Path::new("/etc/ca.pem"));
    }
}
