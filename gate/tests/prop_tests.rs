use proptest::prelude::*;

use vaultops_gate::{AdminGate, AdminSet, ConnectionStatus, GateStatus, SessionState};
use vaultops_types::ChainId;

fn arb_status() -> impl Strategy<Value = ConnectionStatus> {
    prop_oneof![
        Just(ConnectionStatus::Disconnected),
        Just(ConnectionStatus::Connecting),
        Just(ConnectionStatus::Connected),
    ]
}

proptest! {
    /// The gate is total: any combination of status, chain, address, and
    /// allow-list csv evaluates without panicking.
    #[test]
    fn gate_never_panics(
        status in arb_status(),
        chain in prop::option::of(0u64..),
        required in prop::option::of(0u64..),
        address in prop::option::of(".*"),
        csv in ".*",
    ) {
        let gate = AdminGate::new(required.map(ChainId::new), AdminSet::from_csv(&csv));
        let session = SessionState {
            status,
            chain_id: chain.map(ChainId::new),
            address,
        };
        let _ = gate.evaluate(&session);
    }

    /// Connecting always wins, regardless of every other input.
    #[test]
    fn connecting_always_wins(
        chain in prop::option::of(0u64..),
        required in prop::option::of(0u64..),
        address in prop::option::of(".*"),
    ) {
        let gate = AdminGate::new(required.map(ChainId::new), AdminSet::from_csv(""));
        let session = SessionState {
            status: ConnectionStatus::Connecting,
            chain_id: chain.map(ChainId::new),
            address,
        };
        prop_assert_eq!(gate.evaluate(&session), GateStatus::Connecting);
    }

    /// A connected session on a mismatched chain is always WrongNetwork,
    /// even for allow-listed addresses.
    #[test]
    fn chain_mismatch_always_wins_when_connected(
        bytes in prop::array::uniform20(0u8..),
        required in 0u64..u64::MAX / 2,
        offset in 1u64..1000,
    ) {
        let admin = format!("0x{}", hex::encode(bytes));
        let gate = AdminGate::new(Some(ChainId::new(required)), AdminSet::from_csv(&admin));
        let session = SessionState::connected(admin, ChainId::new(required + offset));
        prop_assert_eq!(gate.evaluate(&session), GateStatus::WrongNetwork);
    }

    /// Evaluation is deterministic: the same inputs give the same verdict.
    #[test]
    fn gate_is_deterministic(
        status in arb_status(),
        chain in prop::option::of(0u64..),
        address in prop::option::of(".*"),
        csv in ".*",
    ) {
        let gate = AdminGate::new(Some(ChainId::new(80094)), AdminSet::from_csv(&csv));
        let session = SessionState { status, chain_id: chain.map(ChainId::new), address };
        prop_assert_eq!(gate.evaluate(&session), gate.evaluate(&session));
    }
}
