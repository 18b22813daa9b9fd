//! Queueing governance-token drop boosts onto a validator.

use vaultops_provider::{erc20, CallArg, ContractCall, Provider, Receipt};
use vaultops_types::{Address, ChainId, TokenAmount, TxHash, ValidatorPubkey};

use crate::common::{await_success, decimals_or_default, ensure_chain, parse_positive_amount};
use crate::error::ActionError;

#[derive(Clone, Debug)]
pub struct QueueDropBoost {
    pub boost_token: Address,
    pub chain: ChainId,
    pub explorer_base_url: String,
}

impl QueueDropBoost {
    /// The connected account's boost-token balance, zero when the read
    /// fails.
    pub async fn boosted_balance<P: Provider>(&self, provider: &P, owner: &Address) -> TokenAmount {
        erc20::balance_of(provider, &self.boost_token, owner)
            .await
            .unwrap_or(TokenAmount::ZERO)
    }

    /// `queueDropBoost(pubkey, amount)`. The pubkey must be a full
    /// 48-byte key; a malformed one never reaches the chain.
    pub async fn queue<P: Provider>(
        &self,
        provider: &P,
        pubkey_input: &str,
        amount_input: &str,
    ) -> Result<Receipt, ActionError> {
        let pubkey = ValidatorPubkey::parse(pubkey_input)
            .map_err(|e| ActionError::Validation(e.to_string()))?;
        let decimals = decimals_or_default(provider, &self.boost_token).await;
        let value = parse_positive_amount(amount_input, decimals)?;

        ensure_chain(provider, self.chain).await?;
        let hash = provider
            .send(
                &ContractCall::new(&self.boost_token, "queueDropBoost")
                    .arg(CallArg::Bytes(pubkey.to_hex()))
                    .arg(value),
            )
            .await?;
        await_success(provider, hash).await
    }

    /// Explorer link for a submitted transaction.
    pub fn explorer_tx_url(&self, hash: &TxHash) -> String {
        format!("{}/tx/{}", self.explorer_base_url.trim_end_matches('/'), hash)
    }
}
