//! Console configuration with TOML file support.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use vaultops_types::{Address, ChainId, TypeError};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config io error: {0}")]
    Io(String),

    #[error("config parse error: {0}")]
    Parse(String),

    #[error("config field `{field}`: {source}")]
    InvalidAddress {
        field: &'static str,
        source: TypeError,
    },

    #[error("config field `{field}` is required")]
    Missing { field: &'static str },
}

/// Configuration for the vaultops console.
///
/// Can be loaded from a TOML file via [`OpsConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). Contract addresses are kept
/// as raw strings here and resolved — with the offending field named —
/// by [`OpsConfig::contracts`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OpsConfig {
    /// Chain id every action targets.
    #[serde(default = "default_chain_id")]
    pub chain_id: u64,

    /// Comma-separated admin allow-list.
    #[serde(default)]
    pub admin_addresses: String,

    /// Wallet bridge endpoint.
    #[serde(default = "default_bridge_url")]
    pub bridge_url: String,

    /// Treasury distributor holding collected performance fees.
    #[serde(default)]
    pub treasury_holder: String,

    /// Destination for claimed fees (the operations multisig).
    #[serde(default)]
    pub claim_destination: String,

    /// Stable token (fee denomination).
    #[serde(default)]
    pub stable_token: String,

    /// Yield token (redeemable for the wrapped native token).
    #[serde(default)]
    pub yield_token: String,

    /// Governance token (burn target).
    #[serde(default)]
    pub governance_token: String,

    /// Boost token (drop-boost queueing).
    #[serde(default)]
    pub boost_token: String,

    /// Staking contract (unstake / unstake-all).
    #[serde(default)]
    pub staking_contract: String,

    /// Reward vault funded by bribes.
    #[serde(default)]
    pub reward_vault: String,

    /// Validator registry (pubkey updates).
    #[serde(default)]
    pub validator_registry: String,

    /// Wrapped native token, priced via the external feed.
    #[serde(default)]
    pub wrapped_native_token: Option<String>,

    /// Additional tokens shown in the holdings list.
    #[serde(default)]
    pub extra_tokens: Vec<String>,

    /// Fixed redeem ratio in basis points (9000 = 0.9 output per input).
    #[serde(default = "default_ratio_bps")]
    pub redeem_ratio_bps: u32,

    /// Default slippage buffer for redeem min-out, in basis points.
    #[serde(default = "default_slippage_bps")]
    pub default_slippage_bps: u32,

    /// Block-explorer base URL for "view transaction" links.
    #[serde(default = "default_explorer")]
    pub explorer_base_url: String,

    /// Price feed base URL.
    #[serde(default = "default_price_feed")]
    pub price_feed_base_url: String,

    /// Chain slug in the price feed's pair path.
    #[serde(default = "default_chain_slug")]
    pub price_feed_chain_slug: String,

    /// Pair id for the wrapped native token on the price feed.
    #[serde(default)]
    pub price_feed_pair: Option<String>,

    /// Price refresh interval in seconds.
    #[serde(default = "default_price_refresh")]
    pub price_refresh_secs: u64,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_chain_id() -> u64 {
    80094
}

fn default_bridge_url() -> String {
    "http://127.0.0.1:7740".to_string()
}

fn default_ratio_bps() -> u32 {
    9000
}

fn default_slippage_bps() -> u32 {
    50
}

fn default_explorer() -> String {
    "https://berascan.com".to_string()
}

fn default_price_feed() -> String {
    "https://api.dexscreener.com".to_string()
}

fn default_chain_slug() -> String {
    "berachain".to_string()
}

fn default_price_refresh() -> u64 {
    30
}

// ── Resolved contract addresses ────────────────────────────────────────

/// All contract addresses from the config, parsed and normalized.
#[derive(Clone, Debug)]
pub struct Contracts {
    pub treasury_holder: Address,
    pub claim_destination: Address,
    pub stable_token: Address,
    pub yield_token: Address,
    pub governance_token: Address,
    pub boost_token: Address,
    pub staking_contract: Address,
    pub reward_vault: Address,
    pub validator_registry: Address,
    pub wrapped_native_token: Option<Address>,
    pub extra_tokens: Vec<Address>,
}

fn resolve(field: &'static str, raw: &str) -> Result<Address, ConfigError> {
    if raw.trim().is_empty() {
        return Err(ConfigError::Missing { field });
    }
    Address::parse(raw).map_err(|source| ConfigError::InvalidAddress { field, source })
}

// ── Impl ───────────────────────────────────────────────────────────────

impl OpsConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &str) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).expect("OpsConfig is always serializable to TOML")
    }

    pub fn chain(&self) -> ChainId {
        ChainId::new(self.chain_id)
    }

    /// Resolve every contract address, reporting the first bad field.
    pub fn contracts(&self) -> Result<Contracts, ConfigError> {
        let wrapped_native_token = match &self.wrapped_native_token {
            Some(raw) if !raw.trim().is_empty() => {
                Some(resolve("wrapped_native_token", raw)?)
            }
            _ => None,
        };
        let extra_tokens = self
            .extra_tokens
            .iter()
            .map(|raw| resolve("extra_tokens", raw))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Contracts {
            treasury_holder: resolve("treasury_holder", &self.treasury_holder)?,
            claim_destination: resolve("claim_destination", &self.claim_destination)?,
            stable_token: resolve("stable_token", &self.stable_token)?,
            yield_token: resolve("yield_token", &self.yield_token)?,
            governance_token: resolve("governance_token", &self.governance_token)?,
            boost_token: resolve("boost_token", &self.boost_token)?,
            staking_contract: resolve("staking_contract", &self.staking_contract)?,
            reward_vault: resolve("reward_vault", &self.reward_vault)?,
            validator_registry: resolve("validator_registry", &self.validator_registry)?,
            wrapped_native_token,
            extra_tokens,
        })
    }
}

impl Default for OpsConfig {
    fn default() -> Self {
        Self {
            chain_id: default_chain_id(),
            admin_addresses: String::new(),
            bridge_url: default_bridge_url(),
            treasury_holder: String::new(),
            claim_destination: String::new(),
            stable_token: String::new(),
            yield_token: String::new(),
            governance_token: String::new(),
            boost_token: String::new(),
            staking_contract: String::new(),
            reward_vault: String::new(),
            validator_registry: String::new(),
            wrapped_native_token: None,
            extra_tokens: Vec::new(),
            redeem_ratio_bps: default_ratio_bps(),
            default_slippage_bps: default_slippage_bps(),
            explorer_base_url: default_explorer(),
            price_feed_base_url: default_price_feed(),
            price_feed_chain_slug: default_chain_slug(),
            price_feed_pair: None,
            price_refresh_secs: default_price_refresh(),
        }
    }
}
