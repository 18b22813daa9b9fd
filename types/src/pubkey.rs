//! Validator public key (48-byte compressed BLS key).

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::TypeError;

/// Number of bytes in a compressed BLS public key.
pub const PUBKEY_BYTES: usize = 48;

/// A validator's compressed BLS public key.
///
/// Serializes as its `0x`-prefixed hex form; serde has no array impls
/// past 32 bytes and the hex form is what every consumer wants anyway.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ValidatorPubkey([u8; PUBKEY_BYTES]);

impl Serialize for ValidatorPubkey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ValidatorPubkey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(D::Error::custom)
    }
}

impl ValidatorPubkey {
    /// Parse a hex string, with or without a `0x` prefix.
    ///
    /// Requires exactly 96 hex characters (48 bytes).
    pub fn parse(raw: &str) -> Result<Self, TypeError> {
        let s = raw.trim();
        let hex_part = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);

        if hex_part.len() != PUBKEY_BYTES * 2 {
            return Err(TypeError::InvalidPubkey(format!(
                "expected {} hex chars, got {}",
                PUBKEY_BYTES * 2,
                hex_part.len()
            )));
        }

        let bytes = hex::decode(hex_part)
            .map_err(|e| TypeError::InvalidPubkey(format!("bad hex: {e}")))?;
        let mut key = [0u8; PUBKEY_BYTES];
        key.copy_from_slice(&bytes);
        Ok(Self(key))
    }

    pub fn as_bytes(&self) -> &[u8; PUBKEY_BYTES] {
        &self.0
    }

    /// `0x`-prefixed lowercase hex form, as contracts expect it.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Display for ValidatorPubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for ValidatorPubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ValidatorPubkey({})", self.to_hex())
    }
}

impl FromStr for ValidatorPubkey {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Normalize a user-entered hex string to `0x`-prefixed lowercase form.
///
/// Validates the characters but not the length; length policy is the
/// caller's (a hard requirement for drop boosts, a soft warning when
/// registering validator keys).
pub fn normalize_hex(raw: &str) -> Result<String, TypeError> {
    let s = raw.trim();
    let hex_part = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
    if hex_part.is_empty() {
        return Err(TypeError::InvalidPubkey("empty hex string".into()));
    }
    if !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(TypeError::InvalidPubkey(format!("not a hex string: {s}")));
    }
    Ok(format!("0x{}", hex_part.to_ascii_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex96() -> String {
        "ab".repeat(48)
    }

    #[test]
    fn parse_with_and_without_prefix() {
        let bare = hex96();
        let prefixed = format!("0x{bare}");
        let a = ValidatorPubkey::parse(&bare).unwrap();
        let b = ValidatorPubkey::parse(&prefixed).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_hex(), prefixed);
    }

    #[test]
    fn rejects_94_and_98_chars() {
        assert!(ValidatorPubkey::parse(&"ab".repeat(47)).is_err());
        assert!(ValidatorPubkey::parse(&"ab".repeat(49)).is_err());
    }

    #[test]
    fn rejects_non_hex() {
        let mut s = hex96();
        s.replace_range(0..2, "zz");
        assert!(ValidatorPubkey::parse(&s).is_err());
    }

    #[test]
    fn normalize_adds_prefix_and_lowercases() {
        assert_eq!(normalize_hex("ABCD").unwrap(), "0xabcd");
        assert_eq!(normalize_hex("0xABCD").unwrap(), "0xabcd");
    }

    #[test]
    fn serde_round_trips_through_the_hex_form() {
        let key = ValidatorPubkey::parse(&hex96()).unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, format!("\"0x{}\"", hex96()));
        let back: ValidatorPubkey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
        assert!(serde_json::from_str::<ValidatorPubkey>("\"0xabcd\"").is_err());
    }

    #[test]
    fn normalize_rejects_garbage() {
        assert!(normalize_hex("").is_err());
        assert!(normalize_hex("0x").is_err());
        assert!(normalize_hex("hello").is_err());
    }
}
