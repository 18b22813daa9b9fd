//! Operator actions for the vaultops console.
//!
//! One module per dashboard form. Every write action follows the same
//! protocol: validate locally, switch the session to the target chain,
//! satisfy allowances where needed, submit, await the receipt, and map
//! any failure to a short display message. No automatic retries exist
//! anywhere; redeem and burn use a single explicit fallback strategy
//! pass instead.

pub mod boost;
pub mod burn;
pub mod claim;
pub mod common;
pub mod config;
pub mod error;
pub mod holdings;
pub mod pricing;
pub mod pubkeys;
pub mod redeem;
pub mod rewards;
pub mod treasury;
pub mod unstake;

pub use config::{ConfigError, Contracts, OpsConfig};
pub use error::ActionError;
