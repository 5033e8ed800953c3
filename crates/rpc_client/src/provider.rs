use crate::RpcClient;
use artist_token_core::{
    Address, CallRequest, NetworkId, Provider, ProviderError, Receipt, TransactionRequest, TxHash,
};
use async_trait::async_trait;

#[async_trait]
impl Provider for RpcClient {
    async fn network_id(&self) -> Result<NetworkId, ProviderError> {
        Ok(self.net_version().await?)
    }

    async fn accounts(&self) -> Result<Vec<Address>, ProviderError> {
        Ok(self.eth_accounts().await?)
    }

    async fn call(&self, request: &CallRequest) -> Result<Vec<u8>, ProviderError> {
        Ok(self.eth_call(request).await?)
    }

    async fn send_transaction(
        &self,
        request: &TransactionRequest,
    ) -> Result<TxHash, ProviderError> {
        Ok(self.eth_send_transaction(request).await?)
    }

    async fn transaction_receipt(&self, hash: &TxHash) -> Result<Option<Receipt>, ProviderError> {
        Ok(self.eth_get_transaction_receipt(hash).await?)
    }
}
