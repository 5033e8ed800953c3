//! RPC Models
//!
//! Request and response shapes of the Ethereum JSON-RPC methods the client uses.

mod rpc_receipt;
mod rpc_request;
mod rpc_response;
mod rpc_transaction;

pub use rpc_receipt::RpcTransactionReceipt;
pub use rpc_request::RpcRequest;
pub use rpc_response::{RpcResponse, RpcResponseError};
pub use rpc_transaction::{RpcCall, RpcTransaction};
