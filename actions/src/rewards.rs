//! Funding the reward vault ("bribes").

use vaultops_provider::{erc20, CallArg, ContractCall, Provider, Receipt};
use vaultops_types::{Address, ChainId, TokenAmount};

use crate::common::{await_success, decimals_or_default, ensure_chain, parse_positive_amount};
use crate::error::ActionError;

/// Getter names probed in order for the vault's staker count. Vault
/// deployments disagree on the name; the first one that answers wins.
const STAKER_COUNT_GETTERS: [&str; 3] = ["stakersLength", "numStakers", "getStakersLength"];

/// Which token the bribe is paid in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RewardToken {
    Stable,
    Yield,
}

#[derive(Clone, Debug)]
pub struct AddRewards {
    pub vault: Address,
    pub stable_token: Address,
    pub yield_token: Address,
    pub chain: ChainId,
}

impl AddRewards {
    fn token_address(&self, token: RewardToken) -> &Address {
        match token {
            RewardToken::Stable => &self.stable_token,
            RewardToken::Yield => &self.yield_token,
        }
    }

    /// Probe the vault for its staker count, defaulting to 1 when no
    /// known getter answers.
    pub async fn staker_count<P: Provider>(&self, provider: &P) -> u128 {
        for getter in STAKER_COUNT_GETTERS {
            match provider.call(&ContractCall::new(&self.vault, getter)).await {
                Ok(value) => match value.as_u128() {
                    Ok(count) => return count,
                    Err(e) => tracing::debug!(getter, "unusable staker count: {e}"),
                },
                Err(e) => tracing::debug!(getter, "staker count getter failed: {e}"),
            }
        }
        tracing::warn!(vault = %self.vault, "no staker count getter found, assuming 1");
        1
    }

    /// Read the current allowance and, when short, approve and wait for
    /// the approval to confirm before returning.
    pub async fn ensure_allowance<P: Provider>(
        &self,
        provider: &P,
        token: &Address,
        owner: &Address,
        value: TokenAmount,
    ) -> Result<(), ActionError> {
        let current = erc20::allowance(provider, token, owner, &self.vault).await?;
        if current >= value {
            return Ok(());
        }
        let hash = erc20::approve(provider, token, &self.vault, value).await?;
        await_success(provider, hash).await?;
        Ok(())
    }

    /// Fund the vault: validate, switch chain, satisfy the allowance,
    /// then `fundRewardVault(token, value, stakerCount, 0)`.
    pub async fn fund<P: Provider>(
        &self,
        provider: &P,
        token: RewardToken,
        amount_input: &str,
    ) -> Result<Receipt, ActionError> {
        let token = self.token_address(token).clone();
        let decimals = decimals_or_default(provider, &token).await;
        let value = parse_positive_amount(amount_input, decimals)?;

        let owner = ensure_chain(provider, self.chain).await?;
        self.ensure_allowance(provider, &token, &owner, value).await?;

        let count = self.staker_count(provider).await;
        let hash = provider
            .send(
                &ContractCall::new(&self.vault, "fundRewardVault")
                    .arg(&token)
                    .arg(value)
                    .arg(CallArg::Uint(count))
                    .arg(CallArg::Uint(0)),
            )
            .await?;
        await_success(provider, hash).await
    }
}
