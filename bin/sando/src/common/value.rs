use alloy_primitives::{utils::parse_units, U256};

use super::{Result, SandoError};

/// Parses an amount with an optional unit suffix (`wei`, `gwei`, `ether`). Plain numbers are wei.
pub fn parse_ether_value(s: &str) -> Result<U256> {
    let s = s.trim();

    // Find where digits/decimal end and unit begins
    let split_pos = s.find(|c: char| !c.is_ascii_digit() && c != '.').unwrap_or(s.len());

    let (num_str, unit) = s.split_at(split_pos);
    let unit = if unit.is_empty() { "wei" } else { unit };

    let parsed = parse_units(num_str, unit)
        .map_err(|e| SandoError::InvalidInput(format!("Invalid ether value '{s}': {e}")))?;

    Ok(parsed.into())
}

/// Like [`parse_ether_value`], for per-gas fee amounts.
pub fn parse_fee_value(s: &str) -> Result<u128> {
    let value = parse_ether_value(s)?;
    u128::try_from(value)
        .map_err(|_| SandoError::InvalidInput(format!("Fee value '{s}' does not fit in 128 bits")))
}
