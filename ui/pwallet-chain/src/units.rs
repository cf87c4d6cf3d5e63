//! Unit conversion between wei and display amounts.

use alloy::primitives::utils::{format_units, parse_ether};
use alloy::primitives::U256;

use crate::error::{ChainError, Result};

/// Decimals of the native currency on every EVM chain.
pub const ETHER_DECIMALS: u8 = 18;

/// Balance string for display: wei rounded half-up to at most `places`
/// ether decimals, insignificant zeros dropped (`1.0` renders as `1`).
pub fn display_balance(wei: U256, places: u32) -> String {
    let places = places.min(ETHER_DECIMALS as u32) as u8;
    let scale = U256::from(10u8).pow(U256::from(ETHER_DECIMALS - places));
    let rounded = wei.saturating_add(scale / U256::from(2u8)) / scale;
    match format_units(rounded, places) {
        Ok(formatted) => trim_decimal(formatted),
        Err(_) => rounded.to_string(),
    }
}

/// Strip trailing fractional zeros, then a dangling point.
fn trim_decimal(mut value: String) -> String {
    if value.contains('.') {
        while value.ends_with('0') {
            value.pop();
        }
        if value.ends_with('.') {
            value.pop();
        }
    }
    value
}

/// Convert a form amount to wei. The amount must be finite and positive;
/// digits past wei precision are dropped.
pub fn ether_from_f64(amount: f64) -> Result<U256> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(ChainError::InvalidAmount(amount.to_string()));
    }
    // f64 Display never uses exponent notation
    let text = amount.to_string();
    let text = match text.split_once('.') {
        Some((whole, frac)) if frac.len() > ETHER_DECIMALS as usize => {
            format!("{whole}.{}", &frac[..ETHER_DECIMALS as usize])
        }
        _ => text,
    };
    let wei = parse_ether(&text).map_err(|e| ChainError::InvalidAmount(format!("{text}: {e}")))?;
    if wei.is_zero() {
        return Err(ChainError::InvalidAmount(format!("{text} is below one wei")));
    }
    Ok(wei)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ether(n: u64) -> U256 {
        U256::from(n) * U256::from(10u64).pow(U256::from(18u8))
    }

    fn milli(n: u64) -> U256 {
        U256::from(n) * U256::from(10u64).pow(U256::from(15u8))
    }

    #[test]
    fn display_balance_strips_insignificant_digits() {
        assert_eq!(display_balance(ether(1), 2), "1");
        assert_eq!(display_balance(U256::ZERO, 2), "0");
        assert_eq!(display_balance(milli(1_230), 2), "1.23");
        assert_eq!(display_balance(milli(1_200), 2), "1.2");
        assert_eq!(display_balance(ether(100), 2), "100");
    }

    #[test]
    fn display_balance_rounds_half_up() {
        assert_eq!(display_balance(milli(126), 2), "0.13");
        assert_eq!(display_balance(milli(125), 2), "0.13");
        assert_eq!(display_balance(milli(124), 2), "0.12");
        assert_eq!(display_balance(milli(999), 2), "1");
        // dust rounds to zero
        assert_eq!(display_balance(U256::from(1u8), 2), "0");
    }

    #[test]
    fn places_are_capped_at_ether_decimals() {
        assert_eq!(display_balance(U256::from(1u8), 40), "0.000000000000000001");
        assert_eq!(display_balance(milli(1_500), 0), "2");
    }

    #[test]
    fn ether_from_f64_requires_positive_finite_amounts() {
        assert_eq!(ether_from_f64(0.1).unwrap(), milli(100));
        assert_eq!(ether_from_f64(2.0).unwrap(), ether(2));
        assert!(ether_from_f64(0.0).is_err());
        assert!(ether_from_f64(-1.0).is_err());
        assert!(ether_from_f64(f64::NAN).is_err());
        assert!(ether_from_f64(f64::INFINITY).is_err());
    }

    #[test]
    fn sub_wei_amounts_are_rejected() {
        assert_eq!(ether_from_f64(1e-18).unwrap(), U256::from(1u8));
        assert!(matches!(ether_from_f64(1e-20), Err(ChainError::InvalidAmount(_))));
    }
}
