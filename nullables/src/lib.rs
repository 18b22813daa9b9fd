//! Nullable infrastructure for deterministic testing.
//!
//! The wallet bridge is abstracted behind the `Provider` trait; this
//! crate supplies a scripted implementation that returns programmed
//! read results, records every submitted transaction, and never touches
//! the network.

pub mod provider;

pub use provider::NullProvider;
