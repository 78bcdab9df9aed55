//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Node names unique, endpoint URLs usable by the transport
//! - Value ranges (sizes and timeouts > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Pure function: NetworkConfig → Result<(), Vec<ValidationError>>

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::channel::descriptor::parse_endpoint;
use crate::config::schema::NetworkConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("channel name must not be empty")]
    EmptyChannelName,

    #[error("identity organization must not be empty")]
    EmptyOrganization,

    #[error("at least one peer is required")]
    NoPeers,

    #[error("duplicate node name '{0}'")]
    DuplicateNode(String),

    #[error("node '{node}' has an invalid url: {reason}")]
    InvalidUrl { node: String, reason: String },

    #[error("peer '{0}' has no organization")]
    MissingPeerOrganization(String),

    #[error("{0} must be greater than zero")]
    ZeroValue(&'static str),

    #[error("invalid metrics address '{0}'")]
    InvalidMetricsAddress(String),
}

/// Check a parsed configuration, collecting every problem.
pub fn validate_config(config: &NetworkConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.channel.name.trim().is_empty() {
        errors.push(ValidationError::EmptyChannelName);
    }
    if config.identity.organization.trim().is_empty() {
        errors.push(ValidationError::EmptyOrganization);
    }
    if config.peers.is_empty() {
        errors.push(ValidationError::NoPeers);
    }

    let mut seen = HashSet::new();
    let nodes = config
        .peers
        .iter()
        .map(|p| (&p.name, &p.url))
        .chain(std::iter::once((&config.orderer.name, &config.orderer.url)));
    for (name, url) in nodes {
        if !seen.insert(name.as_str()) {
            errors.push(ValidationError::DuplicateNode(name.clone()));
        }
        if let Err(reason) = parse_endpoint(url, config.transport.negotiation) {
            errors.push(ValidationError::InvalidUrl {
                node: name.clone(),
                reason,
            });
        }
    }

    for peer in &config.peers {
        if peer.organization.trim().is_empty() {
            errors.push(ValidationError::MissingPeerOrganization(peer.name.clone()));
        }
    }

    let transport = &config.transport;
    let ranges = [
        ("max_inbound_message_size", transport.max_inbound_message_size as u64),
        ("keep_alive_interval_secs", transport.keep_alive_interval_secs),
        ("keep_alive_timeout_secs", transport.keep_alive_timeout_secs),
        ("connect_timeout_secs", transport.connect_timeout_secs),
    ];
    for (field, value) in ranges {
        if value == 0 {
            errors.push(ValidationError::ZeroValue(field));
        }
    }

    let observability = &config.observability;
    if observability.metrics_enabled && observability.metrics_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidMetricsAddress(
            observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::descriptor::NegotiationMode;
    use crate::config::schema::PeerConfig;

    fn peer(name: &str, url: &str) -> PeerConfig {
        PeerConfig {
            name: name.into(),
            url: url.into(),
            organization: "fda".into(),
            tls_cert: None,
            hostname_override: None,
            admin: false,
        }
    }

    fn valid() -> NetworkConfig {
        let mut config = NetworkConfig::default();
        config.peers.push(peer("peer0.fda.state.com", "grpcs://localhost:8051"));
        config
    }

    #[test]
    fn test_valid_config() {
        assert!(validate_config(&valid()).is_ok());
    }

    #[test]
    fn test_no_peers() {
        let errors = validate_config(&NetworkConfig::default()).unwrap_err();
        assert_eq!(errors, vec![ValidationError::NoPeers]);
    }

    #[test]
    fn test_duplicate_names() {
        let mut config = valid();
        config.peers.push(peer("peer0.fda.state.com", "grpcs://localhost:8052"));
        config.peers.push(peer("orderer.state.com", "grpcs://localhost:8053"));

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::DuplicateNode("peer0.fda.state.com".into())));
        assert!(errors.contains(&ValidationError::DuplicateNode("orderer.state.com".into())));
    }

    #[test]
    fn test_bad_urls_collected() {
        let mut config = valid();
        config.peers.push(peer("peer0.medic.state.com", "http://localhost:11051"));
        config.peers.push(peer("peer0.usgovt.state.com", "grpcs://localhost"));
        config.orderer.url = "not a url".into();

        let errors = validate_config(&config).unwrap_err();
        let bad: Vec<_> = errors
            .iter()
            .filter_map(|e| match e {
                ValidationError::InvalidUrl { node, .. } => Some(node.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(bad, vec!["peer0.medic.state.com", "peer0.usgovt.state.com", "orderer.state.com"]);
    }

    #[test]
    fn test_scheme_must_match_negotiation() {
        let mut config = valid();
        config.transport.negotiation = NegotiationMode::Plaintext;
        config.orderer.url = "grpc://localhost:7050".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(&errors[0], ValidationError::InvalidUrl { node, .. } if node == "peer0.fda.state.com"));
    }

    #[test]
    fn test_zero_values_and_metrics() {
        let mut config = valid();
        config.transport.max_inbound_message_size = 0;
        config.transport.keep_alive_timeout_secs = 0;
        config.observability.metrics_enabled = true;
        config.observability.metrics_address = "nowhere".into();

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::ZeroValue("max_inbound_message_size")));
        assert!(errors.contains(&ValidationError::ZeroValue("keep_alive_timeout_secs")));
        assert!(errors.contains(&ValidationError::InvalidMetricsAddress("nowhere".into())));
    }
}
