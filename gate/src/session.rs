//! Wallet session state as reported by the wallet bridge.

use serde::{Deserialize, Serialize};

use vaultops_types::ChainId;

/// Connection phase of the wallet session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConnectionStatus {
    Disconnected,
    Connecting,
    Connected,
}

/// A snapshot of the wallet session.
///
/// The address is kept as a raw string: the gate must be able to
/// represent (and reject) malformed values without failing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub status: ConnectionStatus,
    pub chain_id: Option<ChainId>,
    pub address: Option<String>,
}

impl SessionState {
    pub fn disconnected() -> Self {
        Self {
            status: ConnectionStatus::Disconnected,
            chain_id: None,
            address: None,
        }
    }

    pub fn connected(address: impl Into<String>, chain_id: ChainId) -> Self {
        Self {
            status: ConnectionStatus::Connected,
            chain_id: Some(chain_id),
            address: Some(address.into()),
        }
    }
}
