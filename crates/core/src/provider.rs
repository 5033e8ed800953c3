use crate::error::ProviderError;
use crate::types::{Address, CallRequest, NetworkId, Receipt, TransactionRequest, TxHash};
use async_trait::async_trait;

/// Wallet/node capability the client runs against.
///
/// Implemented over JSON-RPC by the rpc client crate; tests substitute
/// in-memory providers.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Identifier of the network the provider is connected to
    async fn network_id(&self) -> Result<NetworkId, ProviderError>;

    /// Accounts the user authorized, preferred account first
    async fn accounts(&self) -> Result<Vec<Address>, ProviderError>;

    /// Executes a read-only call against the latest state and returns the raw
    /// return data.
    async fn call(&self, request: &CallRequest) -> Result<Vec<u8>, ProviderError>;

    /// Submits a state-changing call; returns once the provider accepted it.
    async fn send_transaction(&self, request: &TransactionRequest)
        -> Result<TxHash, ProviderError>;

    /// `None` while the transaction is still pending
    async fn transaction_receipt(&self, hash: &TxHash) -> Result<Option<Receipt>, ProviderError>;
}
