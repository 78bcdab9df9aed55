//! PEM private-key decoding.

use pkcs8::{ObjectIdentifier, PrivateKeyInfo};

use crate::error::{BootstrapError, BootstrapResult};

/// `id-ecPublicKey` algorithm identifier.
pub const EC_PUBLIC_KEY_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.2.1");

/// NIST P-256 (`prime256v1`) named curve, the Fabric default.
pub const P256_CURVE_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.3.1.7");

/// Opaque handle to a decoded PKCS#8 private key.
///
/// Holds the validated DER document; two handles decoded from the same input
/// compare equal.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKeyHandle {
    der: Vec<u8>,
    algorithm: ObjectIdentifier,
    curve: Option<ObjectIdentifier>,
}

impl PrivateKeyHandle {
    /// Algorithm OID from the `PrivateKeyInfo`.
    pub fn algorithm(&self) -> ObjectIdentifier {
        self.algorithm
    }

    /// Named-curve OID, when the algorithm parameters carry one.
    pub fn curve(&self) -> Option<ObjectIdentifier> {
        self.curve
    }

    /// True for an ECDSA P-256 key.
    pub fn is_p256(&self) -> bool {
        self.algorithm == EC_PUBLIC_KEY_OID && self.curve == Some(P256_CURVE_OID)
    }

    /// PKCS#8 DER encoding, for handing to a signer.
    pub fn pkcs8_der(&self) -> &[u8] {
        &self.der
    }
}

// Key bytes never reach logs.
impl std::fmt::Debug for PrivateKeyHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivateKeyHandle")
            .field("algorithm", &self.algorithm.to_string())
            .field("curve", &self.curve.map(|oid| oid.to_string()))
            .finish_non_exhaustive()
    }
}

/// Decode the first PKCS#8 `PRIVATE KEY` block found in `bytes`.
///
/// Other PEM sections (certificates, SEC1 keys) are skipped. Fails with
/// `KeyDecode` when no PKCS#8 block is present, the PEM framing is broken, or
/// the DER inside is not a valid `PrivateKeyInfo`.
pub fn parse_private_key(bytes: &[u8]) -> BootstrapResult<PrivateKeyHandle> {
    let mut reader = bytes;
    loop {
        match rustls_pemfile::read_one(&mut reader) {
            Ok(Some(rustls_pemfile::Item::Pkcs8Key(key))) => {
                return decode_private_key_info(key.secret_pkcs8_der());
            }
            Ok(Some(_)) => continue,
            Ok(None) => {
                return Err(BootstrapError::KeyDecode(
                    "no PKCS#8 PRIVATE KEY block found".to_string(),
                ));
            }
            Err(e) => {
                return Err(BootstrapError::KeyDecode(format!("malformed PEM: {}", e)));
            }
        }
    }
}

fn decode_private_key_info(der: &[u8]) -> BootstrapResult<PrivateKeyHandle> {
    let info = PrivateKeyInfo::try_from(der)
        .map_err(|e| BootstrapError::KeyDecode(format!("invalid PrivateKeyInfo: {}", e)))?;

    Ok(PrivateKeyHandle {
        der: der.to_vec(),
        algorithm: info.algorithm.oid,
        curve: info.algorithm.parameters_oid().ok(),
    })
}
