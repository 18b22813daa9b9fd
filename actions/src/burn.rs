//! Burning governance tokens out of circulation.

use vaultops_provider::{erc20, ContractCall, Provider, Receipt};
use vaultops_types::{Address, ChainId, TokenAmount};

use crate::common::{await_success, ensure_chain, parse_positive_amount, send_with_fallback};
use crate::error::ActionError;

#[derive(Clone, Debug)]
pub struct BurnToken {
    pub token: Address,
    pub chain: ChainId,
}

/// Supply figures for the burn form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SupplyInfo {
    pub decimals: u8,
    pub total_supply: TokenAmount,
    pub burned: TokenAmount,
    pub circulating: TokenAmount,
}

impl BurnToken {
    /// Total supply less the zero-address balance. Either read failing
    /// degrades that figure to zero rather than erroring the overview.
    pub async fn supply<P: Provider>(&self, provider: &P) -> SupplyInfo {
        let decimals = match erc20::decimals(provider, &self.token).await {
            Ok(d) => d,
            Err(_) => erc20::DEFAULT_DECIMALS,
        };
        let total_supply = erc20::total_supply(provider, &self.token)
            .await
            .unwrap_or(TokenAmount::ZERO);
        let burned = erc20::balance_of(provider, &self.token, &Address::zero())
            .await
            .unwrap_or(TokenAmount::ZERO);
        SupplyInfo {
            decimals,
            total_supply,
            burned,
            circulating: total_supply.saturating_sub(burned),
        }
    }

    /// Burn by transferring to the zero address, falling back to a
    /// `burn(amount)` entrypoint — one attempt each.
    ///
    /// Unlike elsewhere, a failed decimals read aborts here: burning an
    /// amount scaled with guessed decimals is worse than refusing.
    pub async fn burn<P: Provider>(
        &self,
        provider: &P,
        amount_input: &str,
    ) -> Result<Receipt, ActionError> {
        let decimals = erc20::decimals(provider, &self.token).await?;
        let value = parse_positive_amount(amount_input, decimals)?;

        ensure_chain(provider, self.chain).await?;
        let strategies = [
            ContractCall::new(&self.token, "transfer")
                .arg(&Address::zero())
                .arg(value),
            ContractCall::new(&self.token, "burn").arg(value),
        ];
        let hash = send_with_fallback(provider, &strategies).await?;
        await_success(provider, hash).await
    }
}
