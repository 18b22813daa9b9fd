//! Contract read/write seam for vaultops.
//!
//! All on-chain interaction goes through the [`Provider`] trait: a generic
//! "call this function on this contract with these arguments" interface.
//! ABI encoding, signing, and broadcast are delegated to an external
//! wallet bridge; [`WalletBridgeClient`] is the HTTP implementation.

pub mod bridge;
pub mod call;
pub mod erc20;
pub mod error;
pub mod provider;

pub use bridge::WalletBridgeClient;
pub use call::{CallArg, CallValue, ContractCall};
pub use error::ProviderError;
pub use provider::{Provider, Receipt};
