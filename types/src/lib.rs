//! Fundamental types for vaultops.
//!
//! Everything downstream crates share: EVM addresses, transaction hashes,
//! raw token amounts with unit conversion, validator public keys, and the
//! chain identifier.

pub mod address;
pub mod amount;
pub mod chain;
pub mod error;
pub mod hash;
pub mod pubkey;

pub use address::Address;
pub use amount::TokenAmount;
pub use chain::ChainId;
pub use error::TypeError;
pub use hash::TxHash;
pub use pubkey::{normalize_hex, ValidatorPubkey};
