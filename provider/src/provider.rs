//! The provider trait: the seam between actions and the wallet bridge.

use serde::Deserialize;

use vaultops_gate::SessionState;
use vaultops_types::{ChainId, TxHash};

use crate::call::{CallValue, ContractCall};
use crate::error::ProviderError;

/// Receipt of a mined transaction.
#[derive(Clone, Debug, Deserialize)]
pub struct Receipt {
    pub tx_hash: TxHash,
    pub success: bool,
    #[serde(default)]
    pub block_number: u64,
}

/// Generic contract read/write interface.
///
/// Implemented by [`crate::WalletBridgeClient`] for real sessions and by
/// the scripted provider in `vaultops-nullables` for tests. Actions are
/// generic over this trait; no trait objects are needed.
#[allow(async_fn_in_trait)]
pub trait Provider {
    /// Snapshot of the wallet session (connection status, address, chain).
    async fn session(&self) -> Result<SessionState, ProviderError>;

    /// Execute a read-only contract call.
    async fn call(&self, call: &ContractCall) -> Result<CallValue, ProviderError>;

    /// Sign and broadcast a state-changing call; resolves at broadcast,
    /// not at inclusion.
    async fn send(&self, call: &ContractCall) -> Result<TxHash, ProviderError>;

    /// Block until the transaction is included and return its receipt.
    async fn wait_for_receipt(&self, hash: &TxHash) -> Result<Receipt, ProviderError>;

    /// Ask the wallet to switch the session to the given chain.
    async fn switch_chain(&self, chain: ChainId) -> Result<(), ProviderError>;
}
