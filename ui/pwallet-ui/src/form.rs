//! Transfer form fields.

use std::f64;

use crate::transfer::TransferStatus;

/// Destination and amount as typed. Replaced wholesale on every change; no
/// validation beyond the submit guard.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransferForm {
    pub destination: String,
    /// raw amount text, kept so the input shows exactly what was typed
    pub amount_input: String,
    /// parsed amount, NaN when the text has no numeric prefix
    pub amount: f64,
}

impl TransferForm {
    pub fn set_destination(&mut self, value: String) {
        self.destination = value;
    }

    pub fn set_amount(&mut self, value: String) {
        self.amount = parse_float(&value);
        self.amount_input = value;
    }

    pub fn amount_is_valid(&self) -> bool {
        self.amount.is_finite() && self.amount > 0.0
    }

    /// Submit is enabled for a positive amount while nothing is in flight.
    pub fn can_submit(&self, status: &TransferStatus) -> bool {
        self.amount_is_valid() && !status.is_pending()
    }
}

/// Parse the longest numeric prefix after leading whitespace, NaN if there
/// is none (`"12abc"` -> 12, `".5e1x"` -> 5, `"abc"` -> NaN).
pub fn parse_float(input: &str) -> f64 {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    if s[end..].starts_with("Infinity") {
        return if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }
    if digits == 0 {
        return f64::NAN;
    }

    // exponent only counts when at least one digit follows
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }

    s[..end].parse().unwrap_or(f64::NAN)
}
