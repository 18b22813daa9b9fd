//! Raw token amounts with unit conversion.
//!
//! Amounts are fixed-point integers (u128) in the token's smallest unit,
//! never floats. Decimal strings are converted with the token's own
//! decimal count.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::TypeError;

/// A raw token amount in the token's smallest unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenAmount(u128);

impl TokenAmount {
    pub const ZERO: Self = Self(0);
    pub const MAX: Self = Self(u128::MAX);

    pub fn new(raw: u128) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    pub fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// Multiply by a basis-point factor, rounding down.
    ///
    /// Equivalent to `floor(raw × bps / 10_000)` without intermediate
    /// overflow: the quotient and remainder of `raw / 10_000` are scaled
    /// separately.
    pub fn mul_bps(self, bps: u32) -> Self {
        let bps = bps as u128;
        let q = self.0 / 10_000;
        let r = self.0 % 10_000;
        Self(q.saturating_mul(bps).saturating_add(r * bps / 10_000))
    }

    /// Parse a human decimal string (e.g. `"1.5"`) into raw units.
    ///
    /// Rejects empty input, signs, non-digit characters, more fraction
    /// digits than `decimals`, and values that overflow 128 bits.
    pub fn parse_units(input: &str, decimals: u8) -> Result<Self, TypeError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(TypeError::InvalidAmount("empty amount".into()));
        }

        let (int_part, frac_part) = match s.split_once('.') {
            Some((i, f)) => (i, f),
            None => (s, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(TypeError::InvalidAmount(format!("not a number: {s}")));
        }
        if !int_part.chars().all(|c| c.is_ascii_digit())
            || !frac_part.chars().all(|c| c.is_ascii_digit())
        {
            return Err(TypeError::InvalidAmount(format!("not a number: {s}")));
        }
        if frac_part.len() > decimals as usize {
            return Err(TypeError::InvalidAmount(format!(
                "more than {decimals} fractional digits: {s}"
            )));
        }

        let scale = pow10(decimals)?;
        let int_value: u128 = if int_part.is_empty() {
            0
        } else {
            int_part
                .parse()
                .map_err(|_| TypeError::AmountOverflow)?
        };

        // Pad the fraction to `decimals` digits, e.g. "5" with 18 decimals
        // becomes 5 × 10^17.
        let frac_value: u128 = if frac_part.is_empty() {
            0
        } else {
            let digits: u128 = frac_part.parse().map_err(|_| TypeError::AmountOverflow)?;
            let pad = pow10(decimals - frac_part.len() as u8)?;
            digits.checked_mul(pad).ok_or(TypeError::AmountOverflow)?
        };

        int_value
            .checked_mul(scale)
            .and_then(|v| v.checked_add(frac_value))
            .map(Self)
            .ok_or(TypeError::AmountOverflow)
    }

    /// Format raw units as a human decimal string, trimming trailing zeros.
    pub fn format_units(&self, decimals: u8) -> String {
        let scale = match pow10(decimals) {
            Ok(s) => s,
            // decimals beyond 38 cannot occur for amounts that parsed
            Err(_) => return self.0.to_string(),
        };
        let int_part = self.0 / scale;
        let frac_part = self.0 % scale;
        if frac_part == 0 {
            return int_part.to_string();
        }
        let frac_str = format!("{:0width$}", frac_part, width = decimals as usize);
        let trimmed = frac_str.trim_end_matches('0');
        format!("{int_part}.{trimmed}")
    }
}

fn pow10(decimals: u8) -> Result<u128, TypeError> {
    10u128
        .checked_pow(decimals as u32)
        .ok_or_else(|| TypeError::InvalidAmount(format!("unsupported decimals: {decimals}")))
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
