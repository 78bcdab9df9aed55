//! Ledger network bootstrap client.
//!
//! # Architecture Overview
//!
//! ```text
//!   network.toml ──▶ config ──┐
//!                             ▼
//!   keystore/*_sk ──▶ keystore ──▶ identity ──▶ client (ClientContext)
//!   signcerts/*.pem ─────────────────┘              │
//!                                                   ▼
//!                         channel builder ──▶ peers + orderer ──▶ handshake
//!                                                   │
//!                                                   ▼
//!                                         initialized channel
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::json;

use ledger_bootstrap::config::load_config;
use ledger_bootstrap::identity::CertificateSource;
use ledger_bootstrap::keystore::locate_key_file;
use ledger_bootstrap::lifecycle::{signals, startup};
use ledger_bootstrap::observability::logging;
use ledger_bootstrap::{ChannelDescriptor, ClientContext};

#[derive(Parser)]
#[command(name = "ledger-bootstrap")]
#[command(about = "Bootstrap identity and channel for a permissioned ledger network", long_about = None)]
struct Cli {
    /// Network description (TOML).
    #[arg(short, long, default_value = "network.toml")]
    config: PathBuf,

    /// Log level override.
    #[arg(short, long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the private key file in a keystore directory
    LocateKey { dir: PathBuf },
    #[command(flatten)]
    Network(NetworkCommands),
}

/// Commands that read the network description.
#[derive(Subcommand)]
enum NetworkCommands {
    /// Validate the network description
    CheckConfig,
    /// Build the identity and channel from configuration
    Bootstrap {
        /// Keep running (and serving metrics) until interrupted
        #[arg(long)]
        wait: bool,
    },
    /// Act as another organization's admin, then bootstrap
    ActAs {
        organization: String,
        #[arg(long)]
        keystore: Option<PathBuf>,
        #[arg(long)]
        certificate: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Locating a key needs no network description.
    let command = match cli.command {
        Commands::LocateKey { dir } => {
            logging::init_logging(cli.log_level.as_deref().unwrap_or("info"))?;
            let path = locate_key_file(&dir)?;
            println!("{}", path.display());
            return Ok(());
        }
        Commands::Network(command) => command,
    };

    let config = load_config(&cli.config)?;
    let level = cli.log_level.as_deref().unwrap_or(&config.observability.log_level);
    logging::init_logging(level)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "ledger-bootstrap starting");

    let context = ClientContext::instance();
    match command {
        NetworkCommands::CheckConfig => {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "channel": config.channel.name,
                    "peers": config.peers.len(),
                    "orderer": config.orderer.name,
                    "organization": config.identity.organization,
                }))?
            );
        }
        NetworkCommands::Bootstrap { wait } => {
            startup::start_observability(&config);
            let channel = startup::bootstrap(context, &config).await?;
            print_channel(context, &channel)?;
            if wait {
                signals::wait_for_shutdown().await;
            }
        }
        NetworkCommands::ActAs {
            organization,
            keystore,
            certificate,
        } => {
            let keystore = keystore.unwrap_or_else(|| config.crypto.admin_keystore(&organization));
            let certificate =
                certificate.unwrap_or_else(|| config.crypto.admin_signcert(&organization));
            context.act_as(&organization, &keystore, CertificateSource::File(certificate))?;

            let channel = startup::bootstrap(context, &config).await?;
            print_channel(context, &channel)?;
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

fn print_channel(
    context: &ClientContext,
    channel: &ChannelDescriptor,
) -> Result<(), Box<dyn std::error::Error>> {
    let identity = context.current_identity()?;
    let peers: Vec<_> = channel
        .peers()
        .iter()
        .map(|p| json!({ "name": p.name, "url": p.url.as_str() }))
        .collect();
    let admin_peers: Vec<_> = channel.admin_peers().iter().map(|p| p.name.as_str()).collect();

    let summary = json!({
        "channel": channel.name(),
        "initialized": channel.is_initialized(),
        "msp_id": identity.msp_id,
        "principal": identity.display_name,
        "peers": peers,
        "admin_peers": admin_peers,
        "orderer": { "name": channel.orderer().name, "url": channel.orderer().url.as_str() },
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
