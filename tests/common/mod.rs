//! Shared utilities for integration testing.

use std::path::Path;

use tokio::net::TcpListener;

use ledger_bootstrap::identity::CryptoLayout;

pub const ADMIN_KEY: &str = include_str!("../fixtures/admin_key.pem");
pub const ADMIN_CERT: &str = include_str!("../fixtures/admin_cert.pem");

/// Start a node stand-in that accepts and immediately drops connections.
/// Returns the bound port.
pub async fn start_mock_node() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            drop(socket);
        }
    });
    port
}

/// A port nothing listens on.
pub async fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap().port()
}

fn write(path: &Path, contents: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, contents).unwrap();
}

/// Populate a `crypto-config` tree for `organizations` with one admin key,
/// admin certificate and peer TLS certificate each, plus the orderer's TLS
/// certificate.
#[allow(dead_code)]
pub fn write_crypto_tree(layout: &CryptoLayout, organizations: &[&str], orderer: &str) {
    for org in organizations {
        write(&layout.admin_keystore(org).join("priv_sk"), ADMIN_KEY);
        write(&layout.admin_signcert(org), ADMIN_CERT);
        let peer = format!("peer0.{}", layout.org_host(org));
        write(&layout.peer_tls_cert(org, &peer), ADMIN_CERT);
    }
    write(&layout.orderer_tls_cert(orderer), ADMIN_CERT);
}
