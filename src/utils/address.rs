//! Address parsing and formatting.

use alloy::primitives::{hex, Address};

/// Encode bytes as a lowercase hex string with 0x prefix.
pub fn hex_encode(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Parse an address (any case, with or without checksum) and return its
/// canonical lowercase `0x` form.
///
/// Returns `None` if the input is not a 20-byte hex address.
pub fn normalize_address(address: &str) -> Option<String> {
    let parsed: Address = address.trim().parse().ok()?;
    Some(hex_encode(parsed.as_slice()))
}
