use crate::models::{RpcCall, RpcRequest, RpcResponse, RpcTransaction, RpcTransactionReceipt};
use crate::rpc_error::{RpcError, INTERNAL_ERROR, PARSE_ERROR};
use crate::utility::parse_data;
use artist_token_config::ProviderConfig;
use artist_token_core::{Address, CallRequest, NetworkId, Receipt, TransactionRequest, TxHash};
use reqwest::Client;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::trace;
use url::Url;

/// Client for an Ethereum JSON-RPC endpoint over HTTP
#[derive(Debug)]
pub struct RpcClient {
    base_address: Url,
    http_client: Client,
    next_id: AtomicU64,
}

impl RpcClient {
    /// Creates a new RPC client
    pub fn new(url: Url, timeout: Option<Duration>) -> Result<Self, RpcError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| RpcError::new(INTERNAL_ERROR, format!("HTTP client error: {}", e)))?;

        Ok(Self::with_client(http_client, url))
    }

    /// Creates a new RPC client with an existing HTTP client
    pub fn with_client(client: Client, url: Url) -> Self {
        Self {
            base_address: url,
            http_client: client,
            next_id: AtomicU64::new(1),
        }
    }

    pub fn from_config(config: &ProviderConfig) -> Result<Self, RpcError> {
        Self::new(
            config.url.clone(),
            config.request_timeout_secs.map(Duration::from_secs),
        )
    }

    pub fn url(&self) -> &Url {
        &self.base_address
    }

    fn as_rpc_request(&self, method: &str, params: Vec<Value>) -> RpcRequest {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        RpcRequest::new(id, method, params)
    }

    fn as_rpc_response(content: &str) -> Result<RpcResponse, RpcError> {
        serde_json::from_str(content)
            .map_err(|e| RpcError::new(PARSE_ERROR, format!("Invalid response: {}", e)))
    }

    /// Sends an RPC request and returns the raw response
    pub async fn send_async(&self, request: &RpcRequest) -> Result<RpcResponse, RpcError> {
        trace!(target: "artist_token::rpc", method = %request.method, "rpc request");

        let response = self
            .http_client
            .post(self.base_address.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| RpcError::new(INTERNAL_ERROR, format!("HTTP error: {}", e)))?;

        let status = response.status();
        let content = response
            .text()
            .await
            .map_err(|e| RpcError::new(INTERNAL_ERROR, format!("Failed to read response: {}", e)))?;

        if !status.is_success() && content.trim().is_empty() {
            return Err(RpcError::new(
                INTERNAL_ERROR,
                format!("HTTP status {}", status),
            ));
        }

        Self::as_rpc_response(&content)
    }

    /// Sends an RPC request and returns its result, turning error objects
    /// into [`RpcError`]
    pub async fn rpc_send_async(&self, method: &str, params: Vec<Value>) -> Result<Value, RpcError> {
        let request = self.as_rpc_request(method, params);
        self.send_async(&request).await?.into_result()
    }

    /// Returns the current network id
    pub async fn net_version(&self) -> Result<NetworkId, RpcError> {
        match self.rpc_send_async("net_version", vec![]).await? {
            Value::String(id) => Ok(NetworkId::new(id)),
            Value::Number(id) => Ok(NetworkId::new(id.to_string())),
            other => Err(unexpected("net_version", &other)),
        }
    }

    /// Returns the accounts the user authorized
    pub async fn eth_accounts(&self) -> Result<Vec<Address>, RpcError> {
        let result = self.rpc_send_async("eth_accounts", vec![]).await?;
        let accounts: Vec<String> =
            serde_json::from_value(result.clone()).map_err(|_| unexpected("eth_accounts", &result))?;
        Ok(accounts.into_iter().map(Address::new).collect())
    }

    /// Executes a read-only call against the latest block
    pub async fn eth_call(&self, request: &CallRequest) -> Result<Vec<u8>, RpcError> {
        let call = serde_json::to_value(RpcCall::from(request))
            .map_err(|e| RpcError::new(INTERNAL_ERROR, e.to_string()))?;
        match self
            .rpc_send_async("eth_call", vec![call, Value::from("latest")])
            .await?
        {
            Value::String(data) => parse_data(&data),
            other => Err(unexpected("eth_call", &other)),
        }
    }

    /// Submits a transaction for the provider to sign and broadcast
    pub async fn eth_send_transaction(&self, request: &TransactionRequest) -> Result<TxHash, RpcError> {
        let transaction = serde_json::to_value(RpcTransaction::from(request))
            .map_err(|e| RpcError::new(INTERNAL_ERROR, e.to_string()))?;
        match self
            .rpc_send_async("eth_sendTransaction", vec![transaction])
            .await?
        {
            Value::String(hash) => Ok(TxHash::new(hash)),
            other => Err(unexpected("eth_sendTransaction", &other)),
        }
    }

    /// Returns the receipt of a mined transaction, `None` while pending
    pub async fn eth_get_transaction_receipt(&self, hash: &TxHash) -> Result<Option<Receipt>, RpcError> {
        let result = self
            .rpc_send_async("eth_getTransactionReceipt", vec![Value::from(hash.as_str())])
            .await?;
        if result.is_null() {
            return Ok(None);
        }
        let receipt: RpcTransactionReceipt = serde_json::from_value(result.clone())
            .map_err(|_| unexpected("eth_getTransactionReceipt", &result))?;
        Receipt::try_from(receipt).map(Some)
    }
}

fn unexpected(method: &str, value: &Value) -> RpcError {
    RpcError::new(
        PARSE_ERROR,
        format!("unexpected {} result: {}", method, value),
    )
}
