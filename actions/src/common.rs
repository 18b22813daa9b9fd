//! Shared pieces of the per-action write protocol.

use vaultops_gate::ConnectionStatus;
use vaultops_provider::{erc20, ContractCall, Provider, ProviderError, Receipt};
use vaultops_types::{Address, ChainId, TokenAmount, TxHash};

use crate::error::ActionError;

/// Require a connected session and steer it to the target chain.
///
/// Returns the connected address. A session on the wrong chain is
/// switched, not rejected; only a missing connection is an error.
pub async fn ensure_chain<P: Provider>(
    provider: &P,
    chain: ChainId,
) -> Result<Address, ActionError> {
    let session = provider.session().await?;
    if session.status != ConnectionStatus::Connected {
        return Err(ActionError::NotConnected);
    }
    let address = session
        .address
        .as_deref()
        .ok_or(ActionError::NotConnected)
        .and_then(|a| {
            Address::parse(a).map_err(|e| ActionError::Validation(e.to_string()))
        })?;

    if session.chain_id != Some(chain) {
        provider.switch_chain(chain).await?;
    }
    Ok(address)
}

/// Parse a user-entered amount and insist it is strictly positive.
pub fn parse_positive_amount(input: &str, decimals: u8) -> Result<TokenAmount, ActionError> {
    let amount = TokenAmount::parse_units(input, decimals)
        .map_err(|e| ActionError::Validation(e.to_string()))?;
    if amount.is_zero() {
        return Err(ActionError::Validation("enter a positive amount".into()));
    }
    Ok(amount)
}

/// Read a token's decimals, falling back to 18 when the getter fails.
pub async fn decimals_or_default<P: Provider>(provider: &P, token: &Address) -> u8 {
    match erc20::decimals(provider, token).await {
        Ok(d) => d,
        Err(e) => {
            tracing::warn!(token = %token, "decimals lookup failed, assuming 18: {e}");
            erc20::DEFAULT_DECIMALS
        }
    }
}

/// Await inclusion and turn an on-chain failure into an error.
pub async fn await_success<P: Provider>(
    provider: &P,
    hash: TxHash,
) -> Result<Receipt, ActionError> {
    let receipt = provider.wait_for_receipt(&hash).await?;
    if !receipt.success {
        return Err(ActionError::TransactionFailed { hash });
    }
    Ok(receipt)
}

/// Try an ordered list of call shapes, one attempt each.
///
/// The first success wins; the last error is returned when every shape
/// fails. This is the only fallback dispatch in the codebase — there is
/// no retry or backoff behind it.
pub async fn send_with_fallback<P: Provider>(
    provider: &P,
    strategies: &[ContractCall],
) -> Result<TxHash, ActionError> {
    let mut last_err: Option<ProviderError> = None;
    for call in strategies {
        match provider.send(call).await {
            Ok(hash) => return Ok(hash),
            Err(e) => {
                tracing::debug!(function = %call.function, "call shape failed: {e}");
                last_err = Some(e);
            }
        }
    }
    Err(last_err
        .map(ActionError::Provider)
        .unwrap_or_else(|| ActionError::Validation("no call strategies given".into())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vaultops_gate::SessionState;
    use vaultops_nullables::NullProvider;

    const ADMIN: &str = "0xabcdef0123456789abcdef0123456789abcdef01";
    const TOKEN: &str = "0x1111111111111111111111111111111111111111";

    fn token() -> Address {
        Address::parse(TOKEN).unwrap()
    }

    #[tokio::test]
    async fn ensure_chain_switches_when_mismatched() {
        let provider = NullProvider::new(SessionState::connected(ADMIN, ChainId::new(1)));
        let addr = ensure_chain(&provider, ChainId::new(80094)).await.unwrap();
        assert_eq!(addr.as_str(), ADMIN);
        assert_eq!(provider.switched_chains(), vec![ChainId::new(80094)]);
    }

    #[tokio::test]
    async fn ensure_chain_skips_switch_when_matching() {
        let provider = NullProvider::new(SessionState::connected(ADMIN, ChainId::new(80094)));
        ensure_chain(&provider, ChainId::new(80094)).await.unwrap();
        assert!(provider.switched_chains().is_empty());
    }

    #[tokio::test]
    async fn ensure_chain_rejects_disconnected_session() {
        let provider = NullProvider::new(SessionState::disconnected());
        let err = ensure_chain(&provider, ChainId::new(80094)).await.unwrap_err();
        assert!(matches!(err, ActionError::NotConnected));
    }

    #[test]
    fn positive_amount_rules() {
        assert!(parse_positive_amount("1.5", 18).is_ok());
        assert!(parse_positive_amount("0", 18).is_err());
        assert!(parse_positive_amount("", 18).is_err());
        assert!(parse_positive_amount("-3", 18).is_err());
    }

    #[tokio::test]
    async fn fallback_tries_shapes_in_order() {
        let provider = NullProvider::new(SessionState::connected(ADMIN, ChainId::new(80094)));
        provider.fail_send(TOKEN, "transfer", "transfer to the zero address");

        let strategies = [
            ContractCall::new(&token(), "transfer").arg(TokenAmount::new(5)),
            ContractCall::new(&token(), "burn").arg(TokenAmount::new(5)),
        ];
        send_with_fallback(&provider, &strategies).await.unwrap();

        let sent = provider.sent_calls();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].function, "burn");
    }

    #[tokio::test]
    async fn fallback_surfaces_last_error_when_all_fail() {
        let provider = NullProvider::new(SessionState::connected(ADMIN, ChainId::new(80094)));
        provider.fail_send(TOKEN, "transfer", "nope");
        provider.fail_send(TOKEN, "burn", "still no");

        let strategies = [
            ContractCall::new(&token(), "transfer"),
            ContractCall::new(&token(), "burn"),
        ];
        let err = send_with_fallback(&provider, &strategies).await.unwrap_err();
        assert_eq!(err.user_message(), "still no");
    }
}
