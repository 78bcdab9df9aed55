//! Process-wide client context.

use std::path::Path;
use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwapOption;
use tokio::sync::Mutex;

use crate::channel::builder::ChannelBuilder;
use crate::channel::descriptor::{ChannelDescriptor, PeerDescriptor};
use crate::channel::transport::NodeTransport;
use crate::client::handle::ClientHandle;
use crate::config::NetworkConfig;
use crate::error::{BootstrapError, BootstrapResult};
use crate::identity::{build_identity, CertificateSource, Identity};
use crate::observability::metrics;

static INSTANCE: OnceLock<ClientContext> = OnceLock::new();

/// Owns the client handle, the acting identity and the initialized channel.
#[derive(Debug, Default)]
pub struct ClientContext {
    client: ClientHandle,
    channel: ArcSwapOption<ChannelDescriptor>,
    /// Serializes channel builds so concurrent callers build once.
    bootstrap: Mutex<()>,
}

impl ClientContext {
    /// A fresh, empty context. Most callers want [`ClientContext::instance`].
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide context, created on first access.
    pub fn instance() -> &'static ClientContext {
        INSTANCE.get_or_init(|| {
            tracing::debug!("Client context created");
            ClientContext::new()
        })
    }

    /// Make `identity` the one subsequent operations run as.
    ///
    /// Connections of an already initialized channel are not re-authenticated;
    /// use [`ClientContext::rebootstrap`] for that.
    pub fn attach_identity(&self, identity: Identity) {
        tracing::info!(
            msp_id = %identity.msp_id,
            principal = %identity.display_name,
            "Identity attached"
        );
        metrics::record_identity_swap(&identity.msp_id);
        self.client.set_user_context(identity);
    }

    /// Store a built channel, replacing any previous one.
    pub fn set_channel(&self, channel: ChannelDescriptor) -> Arc<ChannelDescriptor> {
        let channel = Arc::new(channel);
        self.channel.store(Some(channel.clone()));
        channel
    }

    /// The initialized channel.
    pub fn channel(&self) -> BootstrapResult<Arc<ChannelDescriptor>> {
        self.channel
            .load_full()
            .ok_or(BootstrapError::NotBootstrapped("channel"))
    }

    /// Peers authorized for administrative queries.
    pub fn admin_peers(&self) -> BootstrapResult<Vec<Arc<PeerDescriptor>>> {
        Ok(self.channel()?.admin_peers().to_vec())
    }

    /// Every peer of the channel, in join order.
    pub fn all_peers(&self) -> BootstrapResult<Vec<Arc<PeerDescriptor>>> {
        Ok(self.channel()?.peers().to_vec())
    }

    /// The client handle, once an identity is attached.
    pub fn client_handle(&self) -> BootstrapResult<&ClientHandle> {
        self.current_identity()?;
        Ok(&self.client)
    }

    /// The identity currently acted as.
    pub fn current_identity(&self) -> BootstrapResult<Arc<Identity>> {
        self.client
            .user_context()
            .ok_or(BootstrapError::NotBootstrapped("identity"))
    }

    /// Build the admin identity of `organization` and act as it.
    pub fn act_as(
        &self,
        organization: &str,
        keystore_dir: &Path,
        certificate: CertificateSource,
    ) -> BootstrapResult<()> {
        let identity = build_identity(organization, keystore_dir, certificate)?;
        self.attach_identity(identity);
        Ok(())
    }

    /// Return the channel, building it first if needed.
    ///
    /// Uses the attached identity, or the configured bootstrap identity when
    /// none is attached yet.
    pub async fn ensure_bootstrapped<T: NodeTransport>(
        &self,
        config: &NetworkConfig,
        transport: &T,
    ) -> BootstrapResult<Arc<ChannelDescriptor>> {
        if let Some(channel) = self.channel.load_full() {
            return Ok(channel);
        }

        let _guard = self.bootstrap.lock().await;
        if let Some(channel) = self.channel.load_full() {
            return Ok(channel);
        }

        self.build_and_store(config, transport).await
    }

    /// Build a fresh channel and swap it in.
    ///
    /// The current channel stays in place if the build fails.
    pub async fn rebootstrap<T: NodeTransport>(
        &self,
        config: &NetworkConfig,
        transport: &T,
    ) -> BootstrapResult<Arc<ChannelDescriptor>> {
        let _guard = self.bootstrap.lock().await;
        self.build_and_store(config, transport).await
    }

    async fn build_and_store<T: NodeTransport>(
        &self,
        config: &NetworkConfig,
        transport: &T,
    ) -> BootstrapResult<Arc<ChannelDescriptor>> {
        let result = self.build(config, transport).await;
        metrics::record_bootstrap(if result.is_ok() { "success" } else { "failure" });

        match result {
            Ok(channel) => Ok(self.set_channel(channel)),
            Err(e) => {
                tracing::error!(channel = %config.channel.name, error = %e, "Bootstrap failed");
                Err(e)
            }
        }
    }

    async fn build<T: NodeTransport>(
        &self,
        config: &NetworkConfig,
        transport: &T,
    ) -> BootstrapResult<ChannelDescriptor> {
        if self.client.user_context().is_none() {
            let identity = build_identity(
                &config.identity.organization,
                &config.bootstrap_keystore(),
                config.bootstrap_certificate(),
            )?;
            self.attach_identity(identity);
        }

        ChannelBuilder::new(&self.client, transport, &config.transport)
            .build_channel(&config.channel.name, &config.peer_targets(), &config.orderer_target())
            .await
    }
}
