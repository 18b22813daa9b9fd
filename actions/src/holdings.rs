//! Aggregated token holdings for the claim destination.

use std::cmp::Ordering;

use vaultops_provider::{erc20, Provider};
use vaultops_types::{Address, TokenAmount};

/// A token to include in the holdings list, with an optional fixed USD
/// price for tokens the external feed does not cover.
#[derive(Clone, Debug)]
pub struct TokenEntry {
    pub address: Address,
    pub fixed_price_usd: Option<f64>,
}

impl TokenEntry {
    pub fn new(address: Address) -> Self {
        Self {
            address,
            fixed_price_usd: None,
        }
    }

    pub fn with_price(address: Address, price_usd: f64) -> Self {
        Self {
            address,
            fixed_price_usd: Some(price_usd),
        }
    }
}

/// Stablecoin symbols pegged to one dollar when no other price applies.
const DOLLAR_PEGGED: [&str; 2] = ["USDC", "USDC.E"];

#[derive(Clone, Debug)]
pub struct HoldingsReader {
    pub owner: Address,
    /// The token priced by the external feed.
    pub wrapped_native: Option<Address>,
    pub tokens: Vec<TokenEntry>,
}

/// One non-zero token position.
#[derive(Clone, Debug)]
pub struct Holding {
    pub token: Address,
    pub symbol: String,
    pub name: String,
    pub decimals: u8,
    pub balance: TokenAmount,
    pub usd_value: Option<f64>,
}

impl Holding {
    pub fn balance_display(&self) -> String {
        self.balance.format_units(self.decimals)
    }
}

#[derive(Clone, Debug, Default)]
pub struct Holdings {
    pub items: Vec<Holding>,
    pub total_usd: f64,
}

fn units_f64(amount: TokenAmount, decimals: u8) -> f64 {
    amount.format_units(decimals).parse().unwrap_or(0.0)
}

impl HoldingsReader {
    /// Read every configured token's balance and metadata.
    ///
    /// Zero and unreadable balances are dropped. Metadata degrades per
    /// field. Pricing, in priority order: the entry's fixed price, the
    /// feed price for the wrapped native token, a 1.0 peg for known
    /// dollar stables, otherwise unpriced. Sorted by USD value then raw
    /// balance, descending, with unpriced positions after priced ones.
    pub async fn load<P: Provider>(&self, provider: &P, native_price: Option<f64>) -> Holdings {
        let mut items = Vec::new();
        for entry in &self.tokens {
            let balance = match erc20::balance_of(provider, &entry.address, &self.owner).await {
                Ok(b) => b,
                Err(e) => {
                    tracing::warn!(token = %entry.address, "balance read failed: {e}");
                    continue;
                }
            };
            if balance.is_zero() {
                continue;
            }

            let meta = erc20::token_metadata(provider, &entry.address).await;
            let symbol_upper = meta.symbol.to_ascii_uppercase();
            let price = entry.fixed_price_usd.or_else(|| {
                if self.wrapped_native.as_ref() == Some(&entry.address) {
                    native_price
                } else if DOLLAR_PEGGED.contains(&symbol_upper.as_str()) {
                    Some(1.0)
                } else {
                    None
                }
            });
            let usd_value = price.map(|p| p * units_f64(balance, meta.decimals));

            items.push(Holding {
                token: entry.address.clone(),
                symbol: meta.symbol,
                name: meta.name,
                decimals: meta.decimals,
                balance,
                usd_value,
            });
        }

        items.sort_by(|a, b| match (a.usd_value, b.usd_value) {
            (Some(x), Some(y)) => y
                .partial_cmp(&x)
                .unwrap_or(Ordering::Equal)
                .then(b.balance.cmp(&a.balance)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => b.balance.cmp(&a.balance),
        });

        let total_usd = items.iter().filter_map(|h| h.usd_value).sum();
        Holdings { items, total_usd }
    }
}
