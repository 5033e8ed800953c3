//! Contract interface lookup and call encoding.
//!
//! The interface description is an alloy [`JsonAbi`]; arguments and return
//! values are [`DynSolValue`]s encoded against the function's declared
//! parameter types.

use crate::types::Address;
use alloy_dyn_abi::{FunctionExt, JsonAbiExt};
use num_bigint::BigUint;
use thiserror::Error;

pub use alloy_dyn_abi::{DynSolType, DynSolValue};
pub use alloy_json_abi::{Function, JsonAbi};
pub use alloy_primitives::{Address as EvmAddress, B256, U256};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AbiError {
    #[error("unsupported ABI type '{0}'")]
    UnsupportedType(String),

    #[error("function '{0}' not found in interface")]
    UnknownFunction(String),

    #[error("expected {expected} arguments, got {got}")]
    ArgumentCount { expected: usize, got: usize },

    #[error("argument {index}: expected {expected}, got {got}")]
    TypeMismatch {
        index: usize,
        expected: String,
        got: String,
    },

    #[error("value does not fit {0}")]
    ValueOutOfRange(String),

    #[error("cannot encode call to {function}: {reason}")]
    Encode { function: String, reason: String },

    #[error("invalid return data of {function}: {reason}")]
    Decode { function: String, reason: String },
}

/// Looks up a function by name; the first overload wins.
pub fn function<'a>(abi: &'a JsonAbi, name: &str) -> Result<&'a Function, AbiError> {
    abi.function(name)
        .and_then(|overloads| overloads.first())
        .ok_or_else(|| AbiError::UnknownFunction(name.to_string()))
}

/// Selector followed by the encoded arguments
pub fn encode_call(function: &Function, args: &[DynSolValue]) -> Result<Vec<u8>, AbiError> {
    if args.len() != function.inputs.len() {
        return Err(AbiError::ArgumentCount {
            expected: function.inputs.len(),
            got: args.len(),
        });
    }
    function
        .abi_encode_input(args)
        .map_err(|e| AbiError::Encode {
            function: function.signature(),
            reason: e.to_string(),
        })
}

pub fn decode_output(function: &Function, data: &[u8]) -> Result<Vec<DynSolValue>, AbiError> {
    function
        .abi_decode_output(data, true)
        .map_err(|e| AbiError::Decode {
            function: function.signature(),
            reason: e.to_string(),
        })
}

/// Parses a declared parameter type such as `bytes32` or `uint256`.
pub fn param_type(ty: &str) -> Result<DynSolType, AbiError> {
    DynSolType::parse(ty).map_err(|_| AbiError::UnsupportedType(ty.to_string()))
}

/// Wei amount as a `uint256` value
pub fn uint(value: &BigUint) -> Result<DynSolValue, AbiError> {
    U256::try_from_be_slice(&value.to_bytes_be())
        .map(|value| DynSolValue::Uint(value, 256))
        .ok_or_else(|| AbiError::ValueOutOfRange("uint256".to_string()))
}

pub fn to_u64(value: &DynSolValue) -> Option<u64> {
    value
        .as_uint()
        .and_then(|(value, _)| u64::try_from(value).ok())
}

/// Lowercase `0x` rendering used throughout the client
pub fn from_evm_address(address: &EvmAddress) -> Address {
    Address::from_bytes(&address.0 .0)
}

/// Human readable rendering of a returned value.
pub fn format_value(value: &DynSolValue) -> String {
    match value {
        DynSolValue::Address(address) => from_evm_address(address).to_string(),
        DynSolValue::Uint(value, _) => value.to_string(),
        DynSolValue::Int(value, _) => value.to_string(),
        DynSolValue::Bool(value) => value.to_string(),
        DynSolValue::FixedBytes(word, size) => {
            format!("0x{}", hex::encode(&word.as_slice()[..*size]))
        }
        DynSolValue::Bytes(bytes) => format!("0x{}", hex::encode(bytes)),
        DynSolValue::String(value) => value.clone(),
        other => format!("{:?}", other),
    }
}
