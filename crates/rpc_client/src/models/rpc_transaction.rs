use crate::utility::{to_data, to_quantity, u64_to_quantity};
use artist_token_core::{CallRequest, TransactionRequest};
use serde::{Deserialize, Serialize};

/// Call object of `eth_call`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcCall {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub from: Option<String>,
    pub to: String,
    pub data: String,
}

impl From<&CallRequest> for RpcCall {
    fn from(request: &CallRequest) -> Self {
        Self {
            from: request.from.as_ref().map(|from| from.to_string()),
            to: request.to.to_string(),
            data: to_data(&request.data),
        }
    }
}

/// Transaction object of `eth_sendTransaction`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcTransaction {
    pub from: String,
    pub to: String,
    pub value: String,
    pub gas: String,
    pub data: String,
}

impl From<&TransactionRequest> for RpcTransaction {
    fn from(request: &TransactionRequest) -> Self {
        Self {
            from: request.from.to_string(),
            to: request.to.to_string(),
            value: to_quantity(&request.value),
            gas: u64_to_quantity(request.gas),
            data: to_data(&request.data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use artist_token_core::Address;
    use num_bigint::BigUint;
    use serde_json::json;

    #[test]
    fn transaction_uses_hex_quantities() {
        let request = TransactionRequest {
            from: Address::from("0xABC"),
            to: Address::from("0xDEF"),
            value: BigUint::from(40_000_000_001_000u64),
            gas: 6_385_876,
            data: vec![0x01, 0x02],
        };
        assert_eq!(
            serde_json::to_value(RpcTransaction::from(&request)).unwrap(),
            json!({
                "from": "0xABC",
                "to": "0xDEF",
                "value": "0x246139ca83e8",
                "gas": "0x6170d4",
                "data": "0x0102"
            })
        );
    }

    #[test]
    fn call_omits_missing_sender() {
        let request = CallRequest {
            to: Address::from("0xDEF"),
            from: None,
            data: vec![0xaa],
        };
        assert_eq!(
            serde_json::to_value(RpcCall::from(&request)).unwrap(),
            json!({"to": "0xDEF", "data": "0xaa"})
        );
    }
}
