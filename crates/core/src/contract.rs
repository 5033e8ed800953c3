use crate::abi::{self, DynSolValue, Function, JsonAbi};
use crate::error::{DappError, Result};
use crate::provider::Provider;
use crate::types::{Address, CallRequest, Receipt, TransactionRequest, TxHash};
use artist_token_config::DEFAULT_RECEIPT_POLL_INTERVAL_MS;
use num_bigint::BigUint;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace};

/// Sender, value and gas of a state-changing call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendOptions {
    pub from: Address,
    /// Attached value in wei
    pub value: BigUint,
    pub gas: u64,
}

/// Capability bound to one deployed contract (address + interface)
#[derive(Clone)]
pub struct ContractHandle {
    address: Address,
    interface: Arc<JsonAbi>,
    provider: Arc<dyn Provider>,
    poll_interval: Duration,
}

impl fmt::Debug for ContractHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContractHandle")
            .field("address", &self.address)
            .field("functions", &self.interface.functions().count())
            .field("poll_interval", &self.poll_interval)
            .finish()
    }
}

impl ContractHandle {
    pub fn new(provider: Arc<dyn Provider>, address: Address, interface: JsonAbi) -> Self {
        Self {
            address,
            interface: Arc::new(interface),
            provider,
            poll_interval: Duration::from_millis(DEFAULT_RECEIPT_POLL_INTERVAL_MS),
        }
    }

    /// Interval between receipt polls of transactions sent through this handle
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn interface(&self) -> &JsonAbi {
        &self.interface
    }

    pub fn function(&self, name: &str) -> Result<&Function> {
        Ok(abi::function(&self.interface, name)?)
    }

    /// Runs a read-only call and decodes its return values.
    pub async fn call(&self, method: &str, args: &[DynSolValue]) -> Result<Vec<DynSolValue>> {
        let function = self.function(method)?;
        let request = CallRequest {
            to: self.address.clone(),
            from: None,
            data: abi::encode_call(function, args)?,
        };

        trace!(target: "artist_token", method, contract = %self.address, "read-only call");
        let output = self.provider.call(&request).await?;
        Ok(abi::decode_output(function, &output)?)
    }

    /// Submits a state-changing call. The returned handle resolves once the
    /// transaction is mined.
    pub async fn send(
        &self,
        method: &str,
        args: &[DynSolValue],
        options: SendOptions,
    ) -> Result<PendingTransaction> {
        let function = self.function(method)?;
        let request = TransactionRequest {
            from: options.from,
            to: self.address.clone(),
            value: options.value,
            gas: options.gas,
            data: abi::encode_call(function, args)?,
        };

        let hash = self.provider.send_transaction(&request).await?;
        debug!(
            target: "artist_token",
            method,
            contract = %self.address,
            tx = %hash,
            "transaction submitted"
        );

        Ok(PendingTransaction {
            hash,
            provider: Arc::clone(&self.provider),
            poll_interval: self.poll_interval,
        })
    }
}

/// Accepted transaction awaiting its receipt
pub struct PendingTransaction {
    hash: TxHash,
    provider: Arc<dyn Provider>,
    poll_interval: Duration,
}

impl PendingTransaction {
    pub fn hash(&self) -> &TxHash {
        &self.hash
    }

    /// Polls for the receipt until the transaction is mined. A reverted
    /// transaction is reported as [`DappError::CallRejected`].
    pub async fn confirmed(self) -> Result<Receipt> {
        loop {
            match self.provider.transaction_receipt(&self.hash).await? {
                Some(receipt) if receipt.success => return Ok(receipt),
                Some(_) => {
                    return Err(DappError::CallRejected {
                        reason: format!("transaction {} reverted", self.hash),
                    })
                }
                None => tokio::time::sleep(self.poll_interval).await,
            }
        }
    }
}
