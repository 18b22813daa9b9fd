//! Unstaking positions from the staking contract.

use vaultops_provider::{CallArg, ContractCall, Provider, Receipt};
use vaultops_types::{Address, ChainId};

use crate::common::{await_success, ensure_chain, parse_positive_amount};
use crate::error::ActionError;

#[derive(Clone, Debug)]
pub struct Unstake {
    pub staking: Address,
    pub chain: ChainId,
    /// Decimals used for amount parsing; staking shares use 18.
    pub decimals: u8,
}

impl Unstake {
    /// `unstake(amount, maxLossBps)`.
    pub async fn unstake<P: Provider>(
        &self,
        provider: &P,
        amount_input: &str,
        max_loss_bps: u32,
    ) -> Result<Receipt, ActionError> {
        let value = parse_positive_amount(amount_input, self.decimals)?;
        ensure_chain(provider, self.chain).await?;

        let hash = provider
            .send(
                &ContractCall::new(&self.staking, "unstake")
                    .arg(value)
                    .arg(CallArg::Uint(max_loss_bps as u128)),
            )
            .await?;
        await_success(provider, hash).await
    }

    /// `unstakeAll()`.
    pub async fn unstake_all<P: Provider>(&self, provider: &P) -> Result<Receipt, ActionError> {
        ensure_chain(provider, self.chain).await?;
        let hash = provider
            .send(&ContractCall::new(&self.staking, "unstakeAll"))
            .await?;
        await_success(provider, hash).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vaultops_gate::SessionState;
    use vaultops_nullables::NullProvider;

    const ADMIN: &str = "0xabcdef0123456789abcdef0123456789abcdef01";
    const STAKING: &str = "0x214f9baf481fb5b4ffde1f7163100c1379102ff9";

    fn unstake() -> Unstake {
        Unstake {
            staking: Address::parse(STAKING).unwrap(),
            chain: ChainId::new(80094),
            decimals: 18,
        }
    }

    fn provider() -> NullProvider {
        NullProvider::new(SessionState::connected(ADMIN, ChainId::new(80094)))
    }

    #[tokio::test]
    async fn unstake_submits_amount_and_max_loss() {
        let p = provider();
        unstake().unstake(&p, "2", 100).await.unwrap();

        let body = p.sent_calls()[0].to_json();
        assert_eq!(body["function"], "unstake");
        assert_eq!(body["args"][0], (2u128 * 10u128.pow(18)).to_string().as_str());
        assert_eq!(body["args"][1], "100");
    }

    #[tokio::test]
    async fn unstake_rejects_non_positive_amounts() {
        let p = provider();
        assert!(unstake().unstake(&p, "0", 0).await.is_err());
        assert!(unstake().unstake(&p, "nope", 0).await.is_err());
        assert!(p.sent_calls().is_empty());
    }

    #[tokio::test]
    async fn unstake_all_takes_no_args() {
        let p = provider();
        unstake().unstake_all(&p).await.unwrap();

        let sent = p.sent_calls();
        assert_eq!(sent[0].function, "unstakeAll");
        assert!(sent[0].args.is_empty());
    }

    #[tokio::test]
    async fn failed_receipt_is_an_error() {
        let p = provider();
        p.fail_receipts();
        let err = unstake().unstake_all(&p).await.unwrap_err();
        assert!(matches!(err, ActionError::TransactionFailed { .. }));
    }
}
