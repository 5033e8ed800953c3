//! Artist Token Core
//!
//! Connection resolution and contract actions for the artist token client.
//!
//! The [`ConnectionResolver`] runs once per [`SessionContext`]: it fetches
//! the deployment metadata, the provider's network id and its authorized
//! accounts concurrently, then moves the context to Ready or Failed. The
//! [`ActionInvoker`] issues registrations and the refresh read path against a
//! Ready context and fails fast otherwise.

pub mod abi;
pub mod amount;
mod contract;
mod error;
mod invoker;
mod metadata;
mod provider;
mod resolver;
mod session;
mod types;

#[cfg(test)]
mod mock;

pub use contract::{ContractHandle, PendingTransaction, SendOptions};
pub use error::{DappError, ProviderError, Result};
pub use invoker::{
    encode_name, ActionInvoker, ActionObserver, ActionRequest, LoggingObserver, Redemption,
    Refresh, RefreshEntry, Submission,
};
pub use metadata::{DeploymentMetadata, FileMetadataSource, MetadataSource, NetworkDeployment};
pub use provider::Provider;
pub use resolver::ConnectionResolver;
pub use session::{Session, SessionContext, SessionState, SessionStatus};
pub use types::{Address, CallRequest, NetworkId, Receipt, TransactionRequest, TxHash};
