//! Network identity subsystem.
//!
//! # Data Flow
//! ```text
//! (organization, keystore dir, certificate source)
//!     → keystore (private key)
//!     → certificate read as UTF-8 text, stored verbatim
//!     → Identity { <org>MSP, PeerAdmin, Enrollment }
//!     → caller attaches it to the ClientContext
//! ```
//!
//! # Design Decisions
//! - The acting organization is an explicit argument, never shared state
//! - Certificates are not parsed here; chain of trust belongs to the transport
//! - Building an identity is repeatable; swapping is the caller's choice

pub mod layout;
pub mod provider;
pub mod types;

pub use layout::CryptoLayout;
pub use provider::build_identity;
pub use types::{CertificateSource, Enrollment, Identity, ADMIN_PRINCIPAL};
