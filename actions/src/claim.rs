//! Performance-fee claims from the treasury distributor.

use vaultops_provider::{erc20, ContractCall, Provider, Receipt};
use vaultops_types::{Address, ChainId, TokenAmount};

use crate::common::{await_success, ensure_chain};
use crate::error::ActionError;

/// Claim accumulated fees out of the treasury holder to a fixed
/// destination.
#[derive(Clone, Debug)]
pub struct ClaimFees {
    pub holder: Address,
    pub destination: Address,
    pub stable_token: Address,
    pub chain: ChainId,
}

/// One claimable token balance sitting on the holder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClaimBalance {
    pub token: Address,
    pub symbol: String,
    pub decimals: u8,
    pub raw: TokenAmount,
}

impl ClaimBalance {
    pub fn display_amount(&self) -> String {
        self.raw.format_units(self.decimals)
    }
}

/// Both claimable balances (stable token + discovered yield token).
#[derive(Clone, Debug)]
pub struct ClaimBalances {
    pub stable: ClaimBalance,
    pub yield_token: Option<ClaimBalance>,
}

impl ClaimFees {
    /// Read the yield-token address off the holder contract.
    pub async fn yield_token<P: Provider>(&self, provider: &P) -> Result<Address, ActionError> {
        let value = provider
            .call(&ContractCall::new(&self.holder, "yBGT"))
            .await?;
        Ok(value.as_address()?)
    }

    /// Claim the stable-token fees.
    pub async fn claim_stable<P: Provider>(&self, provider: &P) -> Result<Receipt, ActionError> {
        self.retrieve(provider, self.stable_token.clone()).await
    }

    /// Claim the yield-token fees; the token address comes from the
    /// holder itself.
    pub async fn claim_yield<P: Provider>(&self, provider: &P) -> Result<Receipt, ActionError> {
        let token = self.yield_token(provider).await?;
        self.retrieve(provider, token).await
    }

    async fn retrieve<P: Provider>(
        &self,
        provider: &P,
        token: Address,
    ) -> Result<Receipt, ActionError> {
        ensure_chain(provider, self.chain).await?;
        let hash = provider
            .send(
                &ContractCall::new(&self.holder, "retrieveToken")
                    .arg(&token)
                    .arg(&self.destination),
            )
            .await?;
        await_success(provider, hash).await
    }

    /// Read both claimable balances, degrading each field to a default
    /// instead of failing the whole read.
    pub async fn balances<P: Provider>(&self, provider: &P) -> ClaimBalances {
        let stable = self
            .balance_with_defaults(provider, self.stable_token.clone(), "HONEY")
            .await;

        let yield_token = match self.yield_token(provider).await {
            Ok(token) => Some(self.balance_with_defaults(provider, token, "yBGT").await),
            Err(e) => {
                tracing::warn!("yield token discovery failed: {e}");
                None
            }
        };

        ClaimBalances {
            stable,
            yield_token,
        }
    }

    async fn balance_with_defaults<P: Provider>(
        &self,
        provider: &P,
        token: Address,
        default_symbol: &str,
    ) -> ClaimBalance {
        let decimals = erc20::decimals(provider, &token)
            .await
            .unwrap_or(erc20::DEFAULT_DECIMALS);
        let symbol = erc20::symbol(provider, &token)
            .await
            .unwrap_or_else(|_| default_symbol.to_string());
        let raw = erc20::balance_of(provider, &token, &self.holder)
            .await
            .unwrap_or(TokenAmount::ZERO);
        ClaimBalance {
            token,
            symbol,
            decimals,
            raw,
        }
    }
}
