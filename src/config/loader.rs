//! Configuration loading from disk.

use std::path::Path;
use std::fs;
use thiserror::Error;

use crate::config::schema::NetworkConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<NetworkConfig, ConfigError> {
    let config: NetworkConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<NetworkConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config = parse_config(&content)?;

    tracing::info!(
        path = ?path,
        channel = %config.channel.name,
        peers = config.peers.len(),
        "Network configuration loaded"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
[channel]
name = "pharmachannel"

[crypto]
root = "/opt/crypto-config"
domain = "state.com"

[[peers]]
name = "peer0.manufacturer.state.com"
url = "grpcs://localhost:9051"
organization = "manufacturer"
admin = true

[orderer]
name = "orderer.state.com"
url = "grpcs://localhost:7050"
"#;

    #[test]
    fn test_parse_minimal() {
        let config = parse_config(MINIMAL).unwrap();
        assert_eq!(config.channel.name, "pharmachannel");
        assert_eq!(config.peers.len(), 1);
        assert!(config.peers[0].admin);
        assert_eq!(config.identity.organization, "manufacturer");
        assert_eq!(config.transport.max_inbound_message_size, 9_000_000);
    }

    #[test]
    fn test_parse_error() {
        let err = parse_config("[channel\nname = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_error_lists_all() {
        let err = parse_config("[channel]\nname = \"\"\n").unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("Validation failed: "));
        assert!(msg.contains("channel name"));
        assert!(msg.contains("at least one peer"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_config(Path::new("/nonexistent/network.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("network.toml");
        std::fs::write(&path, MINIMAL).unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.orderer.url, "grpcs://localhost:7050");
    }
}
