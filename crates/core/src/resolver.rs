use crate::contract::ContractHandle;
use crate::error::{DappError, Result};
use crate::metadata::MetadataSource;
use crate::provider::Provider;
use crate::session::{Session, SessionContext};
use futures::TryFutureExt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// Resolves the session: metadata, network and accounts are fetched
/// concurrently and all three must succeed.
pub struct ConnectionResolver {
    provider: Arc<dyn Provider>,
    metadata: Arc<dyn MetadataSource>,
    poll_interval: Option<Duration>,
}

impl ConnectionResolver {
    pub fn new(provider: Arc<dyn Provider>, metadata: Arc<dyn MetadataSource>) -> Self {
        Self {
            provider,
            metadata,
            poll_interval: None,
        }
    }

    /// Receipt poll interval handed to the resolved contract handle
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = Some(poll_interval);
        self
    }

    /// Runs resolution once for `context`.
    ///
    /// A second call on the same context fails with
    /// [`DappError::ResolverReentered`] and leaves the context untouched. Any
    /// other failure moves the context to Failed and is reported here.
    pub async fn resolve(&self, context: &SessionContext) -> Result<Arc<Session>> {
        context.begin_resolving()?;

        let outcome = self.fetch_session().await;
        match &outcome {
            Ok(session) => info!(
                target: "artist_token",
                account = %session.active_account(),
                network = %session.network_id(),
                contract = %session.contract().address(),
                "session ready"
            ),
            Err(err) => error!(
                target: "artist_token",
                error = %err,
                "connection resolution failed"
            ),
        }

        context.complete(outcome)
    }

    async fn fetch_session(&self) -> Result<Session> {
        let (metadata, network_id, accounts) = futures::try_join!(
            self.metadata.load(),
            self.provider.network_id().map_err(DappError::from),
            self.provider.accounts().map_err(DappError::from),
        )?;

        let active_account = accounts
            .into_iter()
            .next()
            .filter(|account| !account.is_empty())
            .ok_or(DappError::NoAccount)?;

        let deployment = metadata
            .deployment(&network_id)
            .ok_or_else(|| DappError::UnsupportedNetwork {
                network_id: network_id.clone(),
            })?;

        let mut contract = ContractHandle::new(
            Arc::clone(&self.provider),
            deployment.address.clone(),
            metadata.abi.clone(),
        );
        if let Some(poll_interval) = self.poll_interval {
            contract = contract.with_poll_interval(poll_interval);
        }

        Ok(Session::new(active_account, network_id, contract))
    }
}
