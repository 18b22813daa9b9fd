use proptest::prelude::*;

use vaultops_types::{Address, TokenAmount, TxHash, ValidatorPubkey};

proptest! {
    /// Address parsing never panics, whatever the input.
    #[test]
    fn address_parse_never_panics(s in ".*") {
        let _ = Address::parse(&s);
    }

    /// Any 20-byte value renders to a parseable address, case-insensitively.
    #[test]
    fn address_roundtrip(bytes in prop::array::uniform20(0u8..)) {
        let lower = format!("0x{}", hex::encode(bytes));
        let upper = lower.to_uppercase().replace("0X", "0x");
        let a = Address::parse(&lower).unwrap();
        let b = Address::parse(&upper).unwrap();
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a.as_str(), lower.as_str());
    }

    /// format_units/parse_units round-trip for any raw value and sane decimals.
    #[test]
    fn amount_units_roundtrip(raw in 0u128..u128::MAX / 2, decimals in 0u8..=18) {
        let amt = TokenAmount::new(raw);
        let formatted = amt.format_units(decimals);
        let reparsed = TokenAmount::parse_units(&formatted, decimals).unwrap();
        prop_assert_eq!(reparsed, amt);
    }

    /// mul_bps never exceeds the input for factors at or below 100%.
    #[test]
    fn mul_bps_is_contractive(raw in 0u128.., bps in 0u32..=10_000) {
        let amt = TokenAmount::new(raw);
        prop_assert!(amt.mul_bps(bps).raw() <= raw);
    }

    /// mul_bps at exactly 10_000 bps is the identity.
    #[test]
    fn mul_bps_identity(raw in 0u128..) {
        let amt = TokenAmount::new(raw);
        prop_assert_eq!(amt.mul_bps(10_000), amt);
    }

    /// Pubkey hex round-trip for any 48-byte key.
    #[test]
    fn pubkey_roundtrip(bytes in prop::collection::vec(0u8.., 48)) {
        let hex_str = format!("0x{}", hex::encode(&bytes));
        let key = ValidatorPubkey::parse(&hex_str).unwrap();
        prop_assert_eq!(key.to_hex(), hex_str);
        prop_assert_eq!(key.as_bytes().as_slice(), bytes.as_slice());
    }

    /// TxHash parsing never panics.
    #[test]
    fn tx_hash_parse_never_panics(s in ".*") {
        let _ = TxHash::parse(&s);
    }
}
