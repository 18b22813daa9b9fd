//! EVM address type (`0x` + 40 hex chars).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TypeError;

/// An EVM contract or account address.
///
/// Stored in canonical lowercase form so equality and hashing are
/// case-insensitive. Construct via [`Address::parse`], which rejects
/// anything that is not `0x` followed by exactly 40 hex characters.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Address(String);

impl Address {
    /// The zero address, used as the burn destination.
    pub const ZERO_STR: &'static str = "0x0000000000000000000000000000000000000000";

    /// Parse and normalize an address string.
    pub fn parse(raw: &str) -> Result<Self, TypeError> {
        let s = raw.trim();
        let hex_part = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .ok_or_else(|| TypeError::InvalidAddress(format!("missing 0x prefix: {s}")))?;

        if hex_part.len() != 40 {
            return Err(TypeError::InvalidAddress(format!(
                "expected 40 hex chars, got {}: {s}",
                hex_part.len()
            )));
        }
        if !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(TypeError::InvalidAddress(format!("non-hex character: {s}")));
        }

        Ok(Self(format!("0x{}", hex_part.to_ascii_lowercase())))
    }

    /// The zero address.
    pub fn zero() -> Self {
        Self(Self::ZERO_STR.to_string())
    }

    /// Canonical lowercase `0x…` form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == Self::ZERO_STR
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Address {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
