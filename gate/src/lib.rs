//! Admin access gate.
//!
//! Decides whether the current wallet session may use the protected
//! console. The decision is a pure function of the session (connection
//! status, chain, address) and the injected configuration (required
//! chain, allow-list) — no globals, no memory of prior decisions.

pub mod admin_set;
pub mod session;

pub use admin_set::AdminSet;
pub use session::{ConnectionStatus, SessionState};

use vaultops_types::ChainId;

/// The gate's verdict for a session, in priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateStatus {
    Disconnected,
    Connecting,
    WrongNetwork,
    Unauthorized,
    Authorized,
}

impl GateStatus {
    /// Whether protected operations may run under this verdict.
    pub fn is_authorized(&self) -> bool {
        matches!(self, GateStatus::Authorized)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GateStatus::Disconnected => "disconnected",
            GateStatus::Connecting => "connecting",
            GateStatus::WrongNetwork => "wrong-network",
            GateStatus::Unauthorized => "unauthorized",
            GateStatus::Authorized => "authorized",
        }
    }
}

/// The access gate: required chain plus allow-list, both injected at
/// construction.
#[derive(Clone, Debug)]
pub struct AdminGate {
    required_chain: Option<ChainId>,
    admins: AdminSet,
}

impl AdminGate {
    pub fn new(required_chain: Option<ChainId>, admins: AdminSet) -> Self {
        Self {
            required_chain,
            admins,
        }
    }

    /// Evaluate the gate for a session. First match wins:
    ///
    /// 1. connecting session → `Connecting`
    /// 2. anything not connected → `Disconnected`
    /// 3. required and current chain both known and different → `WrongNetwork`
    /// 4. address on the allow-list → `Authorized`
    /// 5. otherwise → `Unauthorized`
    ///
    /// Total and infallible: a malformed or missing address is simply
    /// not a member of the allow-list.
    pub fn evaluate(&self, session: &SessionState) -> GateStatus {
        match session.status {
            ConnectionStatus::Connecting => return GateStatus::Connecting,
            ConnectionStatus::Disconnected => return GateStatus::Disconnected,
            ConnectionStatus::Connected => {}
        }

        if let (Some(required), Some(current)) = (self.required_chain, session.chain_id) {
            if required != current {
                return GateStatus::WrongNetwork;
            }
        }

        let is_admin = session
            .address
            .as_deref()
            .map(|addr| self.admins.contains(addr))
            .unwrap_or(false);

        if is_admin {
            GateStatus::Authorized
        } else {
            GateStatus::Unauthorized
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADMIN: &str = "0xAbCdEf0123456789abcdef0123456789ABCDEF01";
    const OTHER: &str = "0x1111111111111111111111111111111111111111";

    fn gate() -> AdminGate {
        AdminGate::new(Some(ChainId::new(80094)), AdminSet::from_csv(ADMIN))
    }

    fn connected(addr: &str, chain: u64) -> SessionState {
        SessionState {
            status: ConnectionStatus::Connected,
            chain_id: Some(ChainId::new(chain)),
            address: Some(addr.to_string()),
        }
    }

    #[test]
    fn connecting_wins_over_everything() {
        let session = SessionState {
            status: ConnectionStatus::Connecting,
            chain_id: Some(ChainId::new(1)),
            address: Some(ADMIN.to_string()),
        };
        assert_eq!(gate().evaluate(&session), GateStatus::Connecting);
    }

    #[test]
    fn disconnected_wins_over_chain_and_membership() {
        let session = SessionState {
            status: ConnectionStatus::Disconnected,
            chain_id: Some(ChainId::new(80094)),
            address: Some(ADMIN.to_string()),
        };
        assert_eq!(gate().evaluate(&session), GateStatus::Disconnected);
    }

    #[test]
    fn wrong_chain_wins_over_membership() {
        assert_eq!(
            gate().evaluate(&connected(ADMIN, 1)),
            GateStatus::WrongNetwork
        );
    }

    #[test]
    fn admin_on_right_chain_is_authorized() {
        assert_eq!(
            gate().evaluate(&connected(ADMIN, 80094)),
            GateStatus::Authorized
        );
    }

    #[test]
    fn membership_is_case_insensitive() {
        let lower = ADMIN.to_lowercase();
        let upper = format!("0x{}", ADMIN[2..].to_uppercase());
        assert_eq!(
            gate().evaluate(&connected(&lower, 80094)),
            GateStatus::Authorized
        );
        assert_eq!(
            gate().evaluate(&connected(&upper, 80094)),
            GateStatus::Authorized
        );
    }

    #[test]
    fn non_member_is_unauthorized() {
        assert_eq!(
            gate().evaluate(&connected(OTHER, 80094)),
            GateStatus::Unauthorized
        );
    }

    #[test]
    fn malformed_address_is_unauthorized_not_an_error() {
        assert_eq!(
            gate().evaluate(&connected("not-an-address", 80094)),
            GateStatus::Unauthorized
        );
        assert_eq!(
            gate().evaluate(&connected("0x123", 80094)),
            GateStatus::Unauthorized
        );
    }

    #[test]
    fn missing_address_is_unauthorized() {
        let session = SessionState {
            status: ConnectionStatus::Connected,
            chain_id: Some(ChainId::new(80094)),
            address: None,
        };
        assert_eq!(gate().evaluate(&session), GateStatus::Unauthorized);
    }

    #[test]
    fn unknown_current_chain_skips_the_network_check() {
        let session = SessionState {
            status: ConnectionStatus::Connected,
            chain_id: None,
            address: Some(ADMIN.to_string()),
        };
        assert_eq!(gate().evaluate(&session), GateStatus::Authorized);
    }

    #[test]
    fn no_required_chain_skips_the_network_check() {
        let gate = AdminGate::new(None, AdminSet::from_csv(ADMIN));
        assert_eq!(gate.evaluate(&connected(ADMIN, 1)), GateStatus::Authorized);
    }

    #[test]
    fn evaluation_is_stateless() {
        let g = gate();
        let authorized = connected(ADMIN, 80094);
        let rejected = connected(OTHER, 80094);
        assert_eq!(g.evaluate(&authorized), GateStatus::Authorized);
        assert_eq!(g.evaluate(&rejected), GateStatus::Unauthorized);
        // a prior rejection must not leak into the next decision
        assert_eq!(g.evaluate(&authorized), GateStatus::Authorized);
    }
}
