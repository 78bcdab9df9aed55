//! Identity and enrollment types.

use std::path::PathBuf;

use crate::keystore::PrivateKeyHandle;

/// Display name used for every bootstrap identity.
pub const ADMIN_PRINCIPAL: &str = "PeerAdmin";

/// Suffix appended to an organization short name to form its MSP id.
pub const MSP_SUFFIX: &str = "MSP";

/// Derive the MSP id for an organization short name.
pub fn msp_id_for(organization: &str) -> String {
    format!("{}{}", organization, MSP_SUFFIX)
}

/// Private key and certificate proving a principal's identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrollment {
    /// Decoded signing key.
    pub private_key: PrivateKeyHandle,
    /// PEM certificate, verbatim.
    pub certificate_pem: String,
}

/// The principal the client acts as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// MSP id that policies and ACLs are evaluated against.
    pub msp_id: String,
    /// Display name of the principal.
    pub display_name: String,
    /// Key and certificate.
    pub enrollment: Enrollment,
}

impl Identity {
    /// Organization short name (MSP id without its suffix).
    pub fn organization(&self) -> &str {
        self.msp_id.strip_suffix(MSP_SUFFIX).unwrap_or(&self.msp_id)
    }
}

/// Where a certificate comes from.
#[derive(Debug, Clone)]
pub enum CertificateSource {
    /// PEM file on disk.
    File(PathBuf),
    /// PEM supplied by the caller, e.g. an uploaded file.
    InMemory(Vec<u8>),
}

impl CertificateSource {
    /// Human-readable origin for error messages.
    pub fn describe(&self) -> String {
        match self {
            CertificateSource::File(path) => format!("{:?}", path),
            CertificateSource::InMemory(bytes) => format!("in-memory buffer ({} bytes)", bytes.len()),
        }
    }
}

impl From<PathBuf> for CertificateSource {
    fn from(path: PathBuf) -> Self {
        CertificateSource::File(path)
    }
}

impl From<Vec<u8>> for CertificateSource {
    fn from(bytes: Vec<u8>) -> Self {
        CertificateSource::InMemory(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_msp_id_convention() {
        assert_eq!(msp_id_for("manufacturer"), "manufacturerMSP");
        assert_eq!(msp_id_for("fda"), "fdaMSP");
    }

    #[test]
    fn test_certificate_source_describe() {
        let source = CertificateSource::from(vec![1, 2, 3]);
        assert_eq!(source.describe(), "in-memory buffer (3 bytes)");

        let source = CertificateSource::from(PathBuf::from("cert.pem"));
        assert!(source.describe().contains("cert.pem"));
    }
}
