//! Hex encodings used by the Ethereum JSON-RPC API.

use crate::rpc_error::{RpcError, PARSE_ERROR};
use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};

fn strip_hex_prefix(value: &str) -> &str {
    value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value)
}

/// Quantity encoding: `0x` followed by the shortest hex form (`0x0` for zero)
pub fn to_quantity(value: &BigUint) -> String {
    if value.is_zero() {
        "0x0".to_string()
    } else {
        format!("0x{}", value.to_str_radix(16))
    }
}

pub fn u64_to_quantity(value: u64) -> String {
    format!("{:#x}", value)
}

pub fn parse_quantity(value: &str) -> Result<BigUint, RpcError> {
    let digits = strip_hex_prefix(value);
    if digits.is_empty() {
        return Err(RpcError::new(PARSE_ERROR, format!("invalid quantity '{}'", value)));
    }
    BigUint::parse_bytes(digits.as_bytes(), 16)
        .ok_or_else(|| RpcError::new(PARSE_ERROR, format!("invalid quantity '{}'", value)))
}

pub fn parse_u64_quantity(value: &str) -> Result<u64, RpcError> {
    parse_quantity(value)?
        .to_u64()
        .ok_or_else(|| RpcError::new(PARSE_ERROR, format!("quantity '{}' exceeds u64", value)))
}

/// Unformatted data encoding: `0x` followed by two hex digits per byte
pub fn to_data(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

pub fn parse_data(value: &str) -> Result<Vec<u8>, RpcError> {
    hex::decode(strip_hex_prefix(value))
        .map_err(|e| RpcError::new(PARSE_ERROR, format!("invalid data '{}': {}", value, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantities_have_no_leading_zeros() {
        assert_eq!(to_quantity(&BigUint::zero()), "0x0");
        assert_eq!(to_quantity(&BigUint::from(1024u32)), "0x400");
        assert_eq!(u64_to_quantity(6_385_876), "0x6170d4");
        assert_eq!(parse_u64_quantity("0x6170d4").unwrap(), 6_385_876);
        assert_eq!(parse_quantity("0x0").unwrap(), BigUint::zero());
        assert!(parse_quantity("0x").is_err());
        assert!(parse_quantity("0xzz").is_err());
    }

    #[test]
    fn data_round_trips_through_hex() {
        assert_eq!(to_data(&[0xde, 0xad]), "0xdead");
        assert_eq!(parse_data("0xdead").unwrap(), vec![0xde, 0xad]);
        assert_eq!(parse_data("0x").unwrap(), Vec::<u8>::new());
        assert!(parse_data("0xabc").is_err());
    }
}
