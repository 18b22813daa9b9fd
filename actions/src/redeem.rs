//! Redeeming the yield token for the wrapped native token at a fixed
//! ratio.

use vaultops_provider::{ContractCall, Provider, Receipt};
use vaultops_types::{Address, ChainId, TokenAmount};

use crate::common::{
    await_success, decimals_or_default, ensure_chain, parse_positive_amount, send_with_fallback,
};
use crate::error::ActionError;

#[derive(Clone, Debug)]
pub struct RedeemYield {
    pub token: Address,
    pub chain: ChainId,
    /// Fixed output ratio in basis points (9000 = 0.9 out per 1 in).
    pub ratio_bps: u32,
    /// Decimals of the output (wrapped native) token.
    pub output_decimals: u8,
}

impl RedeemYield {
    /// Expected output for an input amount, in output-token raw units.
    pub fn expected_out(&self, amount: TokenAmount) -> TokenAmount {
        amount.mul_bps(self.ratio_bps)
    }

    /// Minimum acceptable output after the slippage buffer.
    pub fn min_out(&self, amount: TokenAmount, slippage_bps: u32) -> TokenAmount {
        self.expected_out(amount)
            .mul_bps(10_000 - slippage_bps.min(10_000))
    }

    /// Redeem, preferring the two-argument `redeem(amount, minOut)`
    /// shape and falling back to `redeem(amount)` — one attempt each.
    pub async fn redeem<P: Provider>(
        &self,
        provider: &P,
        amount_input: &str,
        slippage_bps: u32,
    ) -> Result<Receipt, ActionError> {
        let token_decimals = decimals_or_default(provider, &self.token).await;
        let value = parse_positive_amount(amount_input, token_decimals)?;

        // min-out lives in output-token units; reparse the human amount
        // with the output decimals so the two scales stay independent.
        let output_value = parse_positive_amount(amount_input, self.output_decimals)?;
        let min_out = self.min_out(output_value, slippage_bps);

        ensure_chain(provider, self.chain).await?;

        let strategies = [
            ContractCall::new(&self.token, "redeem")
                .arg(value)
                .arg(min_out),
            ContractCall::new(&self.token, "redeem").arg(value),
        ];
        let hash = send_with_fallback(provider, &strategies).await?;
        await_success(provider, hash).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use vaultops_gate::SessionState;
    use vaultops_nullables::NullProvider;

    const ADMIN: &str = "0xabcdef0123456789abcdef0123456789abcdef01";
    const YBGT: &str = "0x4000000000000000000000000000000000000004";

    fn redeem() -> RedeemYield {
        RedeemYield {
            token: Address::parse(YBGT).unwrap(),
            chain: ChainId::new(80094),
            ratio_bps: 9000,
            output_decimals: 18,
        }
    }

    fn provider() -> NullProvider {
        let p = NullProvider::new(SessionState::connected(ADMIN, ChainId::new(80094)));
        p.stub_read(YBGT, "decimals", json!(18));
        p
    }

    #[test]
    fn expected_out_applies_the_ratio() {
        let ten = TokenAmount::parse_units("10", 18).unwrap();
        let out = redeem().expected_out(ten);
        assert_eq!(out.format_units(18), "9");
    }

    #[test]
    fn min_out_applies_the_slippage_buffer() {
        let ten = TokenAmount::parse_units("10", 18).unwrap();
        let min = redeem().min_out(ten, 50);
        assert_eq!(min.format_units(18), "8.955");
    }

    #[tokio::test]
    async fn prefers_the_two_argument_shape() {
        let p = provider();
        redeem().redeem(&p, "10", 50).await.unwrap();

        let sent = p.sent_calls();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].function, "redeem");
        assert_eq!(sent[0].args.len(), 2);

        let body = sent[0].to_json();
        let expected_min = TokenAmount::parse_units("8.955", 18).unwrap();
        assert_eq!(body["args"][1], expected_min.raw().to_string().as_str());
    }

    #[tokio::test]
    async fn falls_back_to_the_single_argument_shape() {
        let p = provider();
        p.fail_send_once(YBGT, "redeem", "unknown signature");

        redeem().redeem(&p, "10", 50).await.unwrap();

        let sent = p.sent_calls();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].args.len(), 1); // amount-only shape
    }

    #[tokio::test]
    async fn surfaces_the_last_error_when_both_shapes_fail() {
        let p = provider();
        p.fail_send(YBGT, "redeem", "unknown signature");

        let err = redeem().redeem(&p, "10", 50).await.unwrap_err();
        assert_eq!(err.user_message(), "unknown signature");
        assert!(p.sent_calls().is_empty());
    }

    #[tokio::test]
    async fn rejects_zero_amount_locally() {
        let p = provider();
        assert!(redeem().redeem(&p, "0", 50).await.is_err());
        assert!(p.sent_calls().is_empty());
        assert!(p.switched_chains().is_empty());
    }
}
