//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! network file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → NetworkConfig (validated, immutable)
//!     → targets for the identity provider and channel builder
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Paths are joined from the configured crypto root, never from $HOME

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::NetworkConfig;
pub use schema::{ChannelConfig, IdentityConfig, ObservabilityConfig, OrdererConfig, PeerConfig, TransportConfig};
