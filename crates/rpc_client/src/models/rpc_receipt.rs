use crate::rpc_error::RpcError;
use crate::utility::parse_u64_quantity;
use artist_token_core::{Receipt, TxHash};
use serde::{Deserialize, Serialize};

/// Result of `eth_getTransactionReceipt`, restricted to the fields the client
/// reads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcTransactionReceipt {
    pub transaction_hash: String,
    #[serde(default)]
    pub block_number: Option<String>,
    /// `0x1` success, `0x0` reverted; absent before Byzantium
    #[serde(default)]
    pub status: Option<String>,
}

impl TryFrom<RpcTransactionReceipt> for Receipt {
    type Error = RpcError;

    fn try_from(receipt: RpcTransactionReceipt) -> Result<Self, Self::Error> {
        let block_number = receipt
            .block_number
            .as_deref()
            .map(parse_u64_quantity)
            .transpose()?;
        let success = match receipt.status.as_deref() {
            Some(status) => parse_u64_quantity(status)? == 1,
            None => true,
        };
        Ok(Receipt {
            transaction_hash: TxHash::new(receipt.transaction_hash),
            block_number,
            success,
        })
    }
}
