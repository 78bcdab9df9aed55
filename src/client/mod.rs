//! Client context subsystem.
//!
//! # Data Flow
//! ```text
//! web layer
//!     → ClientContext::instance()
//!     → act_as(org, keystore, certificate)   (identity swap)
//!     → ensure_bootstrapped(config, transport) (channel, built once)
//!     → channel() / admin_peers() / client_handle()
//! ```
//!
//! # Design Decisions
//! - One lazily created context per process
//! - Identity and channel slots are atomically swappable (arc-swap)
//! - Accessors fail with NotBootstrapped instead of returning empty values

pub mod context;
pub mod handle;

pub use context::ClientContext;
pub use handle::ClientHandle;
