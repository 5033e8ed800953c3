//! Exact wei arithmetic for user-entered amounts.

use crate::error::{DappError, Result};
use artist_token_config::ETHER_DECIMALS;
use num_bigint::BigUint;
use num_traits::{Pow, Zero};

/// Parses a decimal string with at most `decimals` fractional digits into
/// base units. Signs, exponents and separators are rejected.
pub fn parse_units(input: &str, decimals: u32) -> Result<BigUint> {
    let text = input.trim();
    let invalid = || DappError::InvalidAmount(input.to_string());

    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (text, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(whole) || !all_digits(fraction) || fraction.len() > decimals as usize {
        return Err(invalid());
    }

    let scale = BigUint::from(10u32).pow(decimals);
    let whole = if whole.is_empty() {
        BigUint::zero()
    } else {
        whole.parse::<BigUint>().map_err(|_| invalid())?
    };

    let fraction = if fraction.is_empty() {
        BigUint::zero()
    } else {
        let padded = format!("{:0<width$}", fraction, width = decimals as usize);
        padded.parse::<BigUint>().map_err(|_| invalid())?
    };

    Ok(whole * scale + fraction)
}

/// Ether decimal string to wei
pub fn parse_ether(input: &str) -> Result<BigUint> {
    parse_units(input, ETHER_DECIMALS)
}

/// Parses a token count entered by the user.
pub fn parse_count(input: &str) -> Result<u64> {
    let text = input.trim();
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DappError::InvalidAmount(input.to_string()));
    }
    text.parse::<u64>()
        .map_err(|_| DappError::InvalidAmount(input.to_string()))
}

/// Value attached to a registration: a fee per minted token plus a margin.
pub fn registration_value(count: u64, fee_per_token_wei: u64, margin_wei: u64) -> BigUint {
    BigUint::from(count) * BigUint::from(fee_per_token_wei) + BigUint::from(margin_wei)
}

/// Formats wei as an ether decimal string without trailing zeros.
pub fn format_ether(wei: &BigUint) -> String {
    let scale = BigUint::from(10u32).pow(ETHER_DECIMALS);
    let whole = wei / &scale;
    let fraction = wei % &scale;
    if fraction.is_zero() {
        return whole.to_string();
    }
    let digits = format!("{:0>width$}", fraction.to_string(), width = ETHER_DECIMALS as usize);
    format!("{}.{}", whole, digits.trim_end_matches('0'))
}
