//! Artist Token RPC Client Library
//!
//! Ethereum JSON-RPC client implementing the core `Provider` capability,
//! plus loaders for the deployment metadata document.

pub mod models;
mod metadata_source;
mod provider;
mod rpc_client;
mod rpc_error;
pub mod utility;

pub use metadata_source::{metadata_source, HttpMetadataSource};
pub use rpc_client::RpcClient;
pub use rpc_error::{
    RpcError, EXECUTION_REVERTED, INTERNAL_ERROR, PARSE_ERROR, SERVER_ERROR, USER_REJECTED,
};

// Re-export commonly used types
pub use models::{RpcRequest, RpcResponse, RpcResponseError};
