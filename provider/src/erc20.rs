//! Typed ERC-20 helpers over any [`Provider`].

use vaultops_types::{Address, TokenAmount, TxHash};

use crate::call::ContractCall;
use crate::error::ProviderError;
use crate::provider::Provider;

pub const DEFAULT_DECIMALS: u8 = 18;
pub const FALLBACK_SYMBOL: &str = "UNKNOWN";
pub const FALLBACK_NAME: &str = "Unknown Token";

pub async fn balance_of<P: Provider>(
    provider: &P,
    token: &Address,
    owner: &Address,
) -> Result<TokenAmount, ProviderError> {
    provider
        .call(&ContractCall::new(token, "balanceOf").arg(owner))
        .await?
        .as_amount()
}

pub async fn decimals<P: Provider>(provider: &P, token: &Address) -> Result<u8, ProviderError> {
    let value = provider
        .call(&ContractCall::new(token, "decimals"))
        .await?
        .as_u128()?;
    u8::try_from(value)
        .map_err(|_| ProviderError::InvalidResponse(format!("decimals out of range: {value}")))
}

pub async fn symbol<P: Provider>(provider: &P, token: &Address) -> Result<String, ProviderError> {
    provider
        .call(&ContractCall::new(token, "symbol"))
        .await?
        .as_str()
        .map(str::to_string)
}

pub async fn name<P: Provider>(provider: &P, token: &Address) -> Result<String, ProviderError> {
    provider
        .call(&ContractCall::new(token, "name"))
        .await?
        .as_str()
        .map(str::to_string)
}

pub async fn total_supply<P: Provider>(
    provider: &P,
    token: &Address,
) -> Result<TokenAmount, ProviderError> {
    provider
        .call(&ContractCall::new(token, "totalSupply"))
        .await?
        .as_amount()
}

pub async fn allowance<P: Provider>(
    provider: &P,
    token: &Address,
    owner: &Address,
    spender: &Address,
) -> Result<TokenAmount, ProviderError> {
    provider
        .call(&ContractCall::new(token, "allowance").arg(owner).arg(spender))
        .await?
        .as_amount()
}

pub async fn approve<P: Provider>(
    provider: &P,
    token: &Address,
    spender: &Address,
    value: TokenAmount,
) -> Result<TxHash, ProviderError> {
    provider
        .send(&ContractCall::new(token, "approve").arg(spender).arg(value))
        .await
}

pub async fn transfer<P: Provider>(
    provider: &P,
    token: &Address,
    to: &Address,
    value: TokenAmount,
) -> Result<TxHash, ProviderError> {
    provider
        .send(&ContractCall::new(token, "transfer").arg(to).arg(value))
        .await
}

/// Token metadata with per-field degradation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenMetadata {
    pub decimals: u8,
    pub symbol: String,
    pub name: String,
}

/// Fetch decimals/symbol/name, substituting a conservative default for
/// each field that fails. A broken token lookup never aborts the caller.
pub async fn token_metadata<P: Provider>(provider: &P, token: &Address) -> TokenMetadata {
    let decimals = match decimals(provider, token).await {
        Ok(d) => d,
        Err(e) => {
            tracing::warn!(token = %token, "decimals lookup failed: {e}");
            DEFAULT_DECIMALS
        }
    };
    let symbol = match symbol(provider, token).await {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(token = %token, "symbol lookup failed: {e}");
            FALLBACK_SYMBOL.to_string()
        }
    };
    let name = match name(provider, token).await {
        Ok(n) => n,
        Err(e) => {
            tracing::warn!(token = %token, "name lookup failed: {e}");
            FALLBACK_NAME.to_string()
        }
    };
    TokenMetadata {
        decimals,
        symbol,
        name,
    }
}
