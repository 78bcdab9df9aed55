//! Identity construction from keystore and certificate.

use std::path::Path;

use crate::error::{BootstrapError, BootstrapResult};
use crate::identity::types::{msp_id_for, CertificateSource, Enrollment, Identity, ADMIN_PRINCIPAL};
use crate::keystore;

/// Build the admin identity of `organization`.
///
/// # Arguments
/// * `organization` - Short name; the MSP id becomes `<organization>MSP`
/// * `keystore_dir` - Directory holding exactly one `*_sk` key file
/// * `certificate` - PEM certificate, file or buffer, stored verbatim
///
/// Does not touch any client state: attaching the result is up to the caller.
pub fn build_identity(
    organization: &str,
    keystore_dir: &Path,
    certificate: CertificateSource,
) -> BootstrapResult<Identity> {
    let private_key = keystore::load_private_key(keystore_dir)?;
    let certificate_pem = read_certificate(&certificate)?;

    let identity = Identity {
        msp_id: msp_id_for(organization),
        display_name: ADMIN_PRINCIPAL.to_string(),
        enrollment: Enrollment {
            private_key,
            certificate_pem,
        },
    };

    tracing::info!(
        msp_id = %identity.msp_id,
        principal = %identity.display_name,
        certificate = %certificate.describe(),
        "Identity built"
    );

    Ok(identity)
}

fn read_certificate(source: &CertificateSource) -> BootstrapResult<String> {
    let unreadable = |source_err| BootstrapError::CertificateUnreadable {
        origin: source.describe(),
        source: source_err,
    };

    let bytes = match source {
        CertificateSource::File(path) => std::fs::read(path).map_err(unreadable)?,
        CertificateSource::InMemory(bytes) => bytes.clone(),
    };

    String::from_utf8(bytes)
        .map_err(|e| unreadable(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}
