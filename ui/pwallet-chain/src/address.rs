//! Parsing user-typed addresses and short renderings of them.
//!
//! [`Address`] itself is alloy's; its `Display` is the EIP-55 checksum form.

use alloy::primitives::Address;

use crate::error::{ChainError, Result};

/// Parse `0x` plus 40 hex digits. All-lower and all-upper input carries no
/// checksum; mixed case must match EIP-55.
pub fn parse_address(input: &str) -> Result<Address> {
    let trimmed = input.trim();
    let address: Address = trimmed
        .parse()
        .map_err(|_| ChainError::InvalidAddress(input.to_string()))?;

    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let has_lower = digits.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = digits.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper && address.to_checksum(None)[2..] != *digits {
        return Err(ChainError::InvalidAddress(format!("bad address checksum: {input}")));
    }
    Ok(address)
}

/// Shortened form for tight layouts (`0x2c75...5c23`).
pub fn short_address(address: &Address) -> String {
    let full = address.to_checksum(None);
    format!("{}...{}", &full[..6], &full[full.len() - 4..])
}
