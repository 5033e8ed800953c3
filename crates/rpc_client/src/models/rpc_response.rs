use crate::rpc_error::RpcError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON-RPC 2.0 response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub id: Value,

    #[serde(rename = "jsonrpc", default)]
    pub json_rpc: String,

    /// Absent or `null` for methods such as `eth_getTransactionReceipt` on a
    /// pending transaction
    #[serde(default)]
    pub result: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcResponseError>,
}

/// Error object of a JSON-RPC response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcResponseError {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl From<RpcResponseError> for RpcError {
    fn from(error: RpcResponseError) -> Self {
        RpcError::new(error.code, error.message)
    }
}

impl RpcResponse {
    /// The result value (`Value::Null` when absent), or the error object.
    pub fn into_result(self) -> Result<Value, RpcError> {
        match self.error {
            Some(error) => Err(error.into()),
            None => Ok(self.result.unwrap_or(Value::Null)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_object_becomes_rpc_error() {
        let response: RpcResponse = serde_json::from_value(json!({
            "id": 1,
            "jsonrpc": "2.0",
            "error": {"code": 4001, "message": "User denied transaction signature"}
        }))
        .unwrap();
        assert_eq!(
            response.into_result().unwrap_err(),
            RpcError::new(4001, "User denied transaction signature")
        );
    }

    #[test]
    fn null_result_is_kept() {
        let response: RpcResponse =
            serde_json::from_value(json!({"id": 1, "jsonrpc": "2.0", "result": null})).unwrap();
        assert_eq!(response.into_result().unwrap(), Value::Null);
    }
}
