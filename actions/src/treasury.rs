//! Treasury overview and the bribe-size suggestion.

use vaultops_provider::{erc20, Provider};
use vaultops_types::{Address, TokenAmount};

use crate::common::decimals_or_default;
use crate::error::ActionError;

/// Reads the combined stable-token position: what already sits on the
/// multisig plus the unclaimed performance fees on the holder.
#[derive(Clone, Debug)]
pub struct TreasuryInfo {
    pub stable_token: Address,
    pub multisig: Address,
    pub holder: Address,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreasurySummary {
    pub decimals: u8,
    pub multisig_balance: TokenAmount,
    pub performance_fees: TokenAmount,
    pub total: TokenAmount,
}

impl TreasuryInfo {
    /// Read the summary; each balance degrades to zero on failure so a
    /// broken read never blanks the whole overview.
    pub async fn summary<P: Provider>(&self, provider: &P) -> TreasurySummary {
        let decimals = decimals_or_default(provider, &self.stable_token).await;
        let multisig_balance =
            erc20::balance_of(provider, &self.stable_token, &self.multisig)
                .await
                .unwrap_or(TokenAmount::ZERO);
        let performance_fees = erc20::balance_of(provider, &self.stable_token, &self.holder)
            .await
            .unwrap_or(TokenAmount::ZERO);
        let total = multisig_balance.saturating_add(performance_fees);
        TreasurySummary {
            decimals,
            multisig_balance,
            performance_fees,
            total,
        }
    }
}

/// Suggested bribe given a total balance and the percentage the operator
/// wants to keep: `total × (1 − keep/100)`, clamped to zero for keep at
/// or above 100%.
pub fn suggested_bribe_bps(total: TokenAmount, keep_bps: u32) -> TokenAmount {
    let keep_bps = keep_bps.min(10_000);
    total.mul_bps(10_000 - keep_bps)
}

/// Same, from a user-entered percentage string with up to two decimal
/// places (e.g. `"30"` or `"12.5"`). Keep above 100% clamps to a zero
/// suggestion; a negative keep is rejected as input rather than clamped,
/// since it would suggest bribing more than the balance holds.
pub fn suggested_bribe(total: TokenAmount, keep_percent: &str) -> Result<TokenAmount, ActionError> {
    let keep_bps = TokenAmount::parse_units(keep_percent, 2)
        .map_err(|e| ActionError::Validation(format!("keep percentage: {e}")))?;
    let keep_bps = u32::try_from(keep_bps.raw()).unwrap_or(u32::MAX);
    Ok(suggested_bribe_bps(total, keep_bps))
}
