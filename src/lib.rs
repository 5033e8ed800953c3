//! # Artist Token
//!
//! Client for the artist token contract. It connects to a wallet provider,
//! resolves where the contract is deployed on the provider's network and
//! turns user actions into contract calls.
//!
//! ```rust,no_run
//! use artist_token::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dapp = Dapp::new(DappConfig::default())?;
//!     dapp.connect().await?;
//!
//!     let submission = dapp.register("Pitbull", "38", "1.2")?;
//!     submission.outcome().await?;
//!
//!     for entry in dapp.refresh_all().await?.sorted() {
//!         println!("{}: {:?}", entry.index, entry.result);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`config`] - configuration file types and contract constants
//! - [`core`] - session resolution, ABI encoding and contract actions
//! - [`rpc_client`] - Ethereum JSON-RPC provider and metadata loaders

#![warn(missing_docs)]

pub use artist_token_config as config;
pub use artist_token_core as core;
pub use artist_token_rpc_client as rpc_client;

use artist_token_config::DappConfig;
use artist_token_core::{
    ActionInvoker, ActionObserver, ConnectionResolver, DappError, MetadataSource, Provider,
    Redemption, Refresh, Session, SessionContext, Submission,
};
use artist_token_rpc_client::{metadata_source, RpcClient};
use std::sync::Arc;
use std::time::Duration;

/// Common imports
pub mod prelude {
    pub use crate::config::DappConfig;
    pub use crate::core::{
        ActionObserver, ActionRequest, Address, DappError, NetworkId, Receipt, Refresh,
        RefreshEntry, Session, SessionStatus, Submission,
    };
    pub use crate::core::abi::{format_value, DynSolValue};
    pub use crate::Dapp;
}

/// One client instance: a session context plus the resolver and invoker
/// bound to it.
pub struct Dapp {
    context: SessionContext,
    resolver: ConnectionResolver,
    invoker: ActionInvoker,
}

impl Dapp {
    /// Builds a client talking JSON-RPC to the configured provider.
    pub fn new(config: DappConfig) -> Result<Self, DappError> {
        let provider = RpcClient::from_config(&config.provider)
            .map_err(|e| DappError::Transport(e.to_string()))?;
        let metadata = metadata_source(config.metadata.location());
        Ok(Self::with_provider(config, Arc::new(provider), metadata))
    }

    /// Builds a client over any provider and metadata source.
    pub fn with_provider(
        config: DappConfig,
        provider: Arc<dyn Provider>,
        metadata: Arc<dyn MetadataSource>,
    ) -> Self {
        let resolver = ConnectionResolver::new(provider, metadata).with_poll_interval(
            Duration::from_millis(config.provider.receipt_poll_interval_ms),
        );
        let invoker = ActionInvoker::new(config.contract, config.redeem);
        Self {
            context: SessionContext::new(),
            resolver,
            invoker,
        }
    }

    /// Replaces the observer notified when actions complete.
    pub fn with_observer(mut self, observer: Arc<dyn ActionObserver>) -> Self {
        self.invoker = self.invoker.with_observer(observer);
        self
    }

    /// Resolves the session; must complete before any action.
    pub async fn connect(&self) -> Result<Arc<Session>, DappError> {
        self.resolver.resolve(&self.context).await
    }

    /// The session context shared by all actions
    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    /// Registers an artist from raw form values (`price` in ether).
    pub fn register(&self, name: &str, count: &str, price: &str) -> Result<Submission, DappError> {
        self.invoker
            .register_from_form(&self.context, name, count, price)
    }

    /// Runs the preset redeem action.
    pub fn redeem(&self) -> Result<Redemption, DappError> {
        self.invoker.redeem(&self.context)
    }

    /// Reads the artist count and looks up every artist.
    pub async fn refresh_all(&self) -> Result<Refresh, DappError> {
        self.invoker.refresh_all(&self.context).await
    }
}
