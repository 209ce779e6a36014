//! Account address validation.
//!
//! Addresses are carried as strings on the wire. The node accepts both the
//! full 32 hex digit form and shortened forms such as `0x1`, so validation
//! only checks the prefix, the alphabet and the length.

use crate::constants::ACCOUNT_ADDRESS_LEN;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("address must be a non-empty string")]
    Empty,

    #[error("address must start with 0x: {0}")]
    MissingPrefix(String),

    #[error("address is not valid hex: {0}")]
    InvalidHex(String),

    #[error("address too long: at most {max} bytes, got {actual} hex digits")]
    TooLong { max: usize, actual: usize },
}

/// Validate an account address string (`0x` followed by up to 32 hex digits).
pub fn parse_address(address: &str) -> Result<&str, AddressError> {
    let address = address.trim();
    if address.is_empty() {
        return Err(AddressError::Empty);
    }

    let digits = address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
        .ok_or_else(|| AddressError::MissingPrefix(address.to_string()))?;

    if digits.is_empty() {
        return Err(AddressError::InvalidHex(address.to_string()));
    }
    if digits.len() > ACCOUNT_ADDRESS_LEN * 2 {
        return Err(AddressError::TooLong {
            max: ACCOUNT_ADDRESS_LEN,
            actual: digits.len(),
        });
    }

    // Odd-length short forms (`0x1`) are valid, so pad before decoding.
    let padded = format!("{:0>width$}", digits, width = digits.len() + digits.len() % 2);
    hex::decode(&padded).map_err(|_| AddressError::InvalidHex(address.to_string()))?;

    Ok(address)
}

/// Expand an address to its canonical 32 hex digit form.
pub fn to_full_address(address: &str) -> Result<String, AddressError> {
    let address = parse_address(address)?;
    let digits = &address[2..];
    Ok(format!(
        "0x{:0>width$}",
        digits.to_lowercase(),
        width = ACCOUNT_ADDRESS_LEN * 2
    ))
}
