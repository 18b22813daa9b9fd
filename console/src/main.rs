//! vaultops — operator console for the reward and treasury contracts.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::Parser;

use vaultops_actions::boost::QueueDropBoost;
use vaultops_actions::burn::BurnToken;
use vaultops_actions::claim::ClaimFees;
use vaultops_actions::holdings::{HoldingsReader, TokenEntry};
use vaultops_actions::pricing::{PriceFeed, PricePoller};
use vaultops_actions::pubkeys::SetValidatorPubkeys;
use vaultops_actions::redeem::RedeemYield;
use vaultops_actions::rewards::{AddRewards, RewardToken};
use vaultops_actions::treasury::{suggested_bribe, TreasuryInfo};
use vaultops_actions::unstake::Unstake;
use vaultops_actions::{Contracts, OpsConfig};
use vaultops_gate::{AdminGate, AdminSet, GateStatus};
use vaultops_provider::{Provider, WalletBridgeClient};
use vaultops_types::TxHash;
use vaultops_utils::format::group_thousands;

#[derive(Parser)]
#[command(name = "vaultops", about = "Operator console for reward and treasury contracts")]
struct Cli {
    /// Path to a TOML configuration file. File settings are the base;
    /// CLI flags and env vars override them.
    #[arg(long, env = "VAULTOPS_CONFIG")]
    config: Option<PathBuf>,

    /// Wallet bridge endpoint.
    #[arg(long, env = "VAULTOPS_BRIDGE_URL")]
    bridge_url: Option<String>,

    /// Comma-separated admin allow-list.
    #[arg(long, env = "VAULTOPS_ADMINS")]
    admins: Option<String>,

    /// Chain id every action targets.
    #[arg(long, env = "VAULTOPS_CHAIN_ID")]
    chain_id: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Show the wallet session and the access verdict.
    Status,
    /// List the claim destination's token holdings with USD values.
    Holdings,
    /// Treasury overview; optionally suggest a bribe for a keep percentage.
    Info {
        /// Percentage of the total to keep, e.g. "30" or "12.5".
        #[arg(long)]
        keep_pct: Option<String>,
    },
    /// Claim performance fees from the treasury holder.
    Claim {
        #[command(subcommand)]
        token: ClaimTarget,
    },
    /// Fund the reward vault.
    Bribe {
        #[arg(long)]
        amount: String,
        /// Which token to pay in.
        #[arg(long, value_enum, default_value_t = BribeToken::Stable)]
        token: BribeToken,
    },
    /// Unstake an amount from the staking contract.
    Unstake {
        #[arg(long)]
        amount: String,
        /// Maximum acceptable loss in basis points.
        #[arg(long, default_value_t = 100)]
        max_loss_bps: u32,
    },
    /// Unstake the entire position.
    UnstakeAll,
    /// Redeem yield tokens for the wrapped native token.
    Redeem {
        #[arg(long)]
        amount: String,
        /// Slippage buffer in basis points; defaults to the config value.
        #[arg(long)]
        slippage_bps: Option<u32>,
    },
    /// Register validator public keys on the registry.
    SetPubkeys {
        /// Hex-encoded keys, with or without 0x prefixes.
        keys: Vec<String>,
    },
    /// Queue a drop boost onto a validator.
    QueueBoost {
        #[arg(long)]
        pubkey: String,
        #[arg(long)]
        amount: String,
    },
    /// Burn governance tokens out of circulation.
    Burn {
        #[arg(long)]
        amount: String,
    },
    /// Show the wrapped native token's USD price.
    Price {
        /// Keep polling at the configured refresh interval.
        #[arg(long)]
        watch: bool,
    },
}

#[derive(clap::Subcommand)]
enum ClaimTarget {
    /// The stable token (HONEY).
    Honey,
    /// The yield token (yBGT) discovered from the holder.
    Ybgt,
    /// Both, stable first.
    All,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum BribeToken {
    Stable,
    Yield,
}

fn load_config(cli: &Cli) -> anyhow::Result<OpsConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let path = path.to_string_lossy();
            let cfg = OpsConfig::from_toml_file(&path)
                .with_context(|| format!("loading config from {path}"))?;
            tracing::info!("loaded config from {path}");
            cfg
        }
        None => OpsConfig::default(),
    };
    if let Some(url) = &cli.bridge_url {
        config.bridge_url = url.clone();
    }
    if let Some(admins) = &cli.admins {
        config.admin_addresses = admins.clone();
    }
    if let Some(chain_id) = cli.chain_id {
        config.chain_id = chain_id;
    }
    Ok(config)
}

/// Evaluate the gate and refuse anything short of full authorization.
async fn require_authorized<P: Provider>(
    provider: &P,
    config: &OpsConfig,
) -> anyhow::Result<()> {
    let gate = AdminGate::new(
        Some(config.chain()),
        AdminSet::from_csv(&config.admin_addresses),
    );
    let session = provider.session().await?;
    match gate.evaluate(&session) {
        GateStatus::Authorized => Ok(()),
        verdict => bail!("access denied: {}", verdict.as_str()),
    }
}

fn tx_link(config: &OpsConfig, hash: &TxHash) -> String {
    format!(
        "{}/tx/{}",
        config.explorer_base_url.trim_end_matches('/'),
        hash
    )
}

fn price_feed(config: &OpsConfig) -> Option<PriceFeed> {
    config.price_feed_pair.as_deref().map(|pair| {
        PriceFeed::new(
            &config.price_feed_base_url,
            &config.price_feed_chain_slug,
            pair,
        )
    })
}

fn holdings_reader(contracts: &Contracts) -> HoldingsReader {
    let mut tokens = vec![
        TokenEntry::new(contracts.stable_token.clone()),
        TokenEntry::new(contracts.yield_token.clone()),
    ];
    if let Some(native) = &contracts.wrapped_native_token {
        tokens.push(TokenEntry::new(native.clone()));
    }
    tokens.extend(contracts.extra_tokens.iter().cloned().map(TokenEntry::new));
    HoldingsReader {
        owner: contracts.claim_destination.clone(),
        wrapped_native: contracts.wrapped_native_token.clone(),
        tokens,
    }
}

async fn run_claim(
    provider: &WalletBridgeClient,
    config: &OpsConfig,
    contracts: &Contracts,
    target: &ClaimTarget,
) -> anyhow::Result<()> {
    let claim = ClaimFees {
        holder: contracts.treasury_holder.clone(),
        destination: contracts.claim_destination.clone(),
        stable_token: contracts.stable_token.clone(),
        chain: config.chain(),
    };
    let short = |e: vaultops_actions::ActionError| anyhow::anyhow!(e.user_message());
    match target {
        ClaimTarget::Honey => {
            let receipt = claim.claim_stable(provider).await.map_err(short)?;
            println!("claimed: {}", tx_link(config, &receipt.tx_hash));
        }
        ClaimTarget::Ybgt => {
            let receipt = claim.claim_yield(provider).await.map_err(short)?;
            println!("claimed: {}", tx_link(config, &receipt.tx_hash));
        }
        ClaimTarget::All => {
            let receipt = claim.claim_stable(provider).await.map_err(short)?;
            println!("claimed stable: {}", tx_link(config, &receipt.tx_hash));
            let receipt = claim.claim_yield(provider).await.map_err(short)?;
            println!("claimed yield: {}", tx_link(config, &receipt.tx_hash));
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    vaultops_utils::init_tracing();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let provider = WalletBridgeClient::new(config.bridge_url.clone())?;

    if let Command::Status = cli.command {
        let gate = AdminGate::new(
            Some(config.chain()),
            AdminSet::from_csv(&config.admin_addresses),
        );
        let session = provider.session().await?;
        println!("status:  {}", gate.evaluate(&session).as_str());
        println!(
            "address: {}",
            session.address.as_deref().unwrap_or("(none)")
        );
        println!(
            "chain:   {}",
            session
                .chain_id
                .map(|c| c.get().to_string())
                .unwrap_or_else(|| "(unknown)".into())
        );
        return Ok(());
    }

    require_authorized(&provider, &config).await?;
    let contracts = config.contracts()?;

    match &cli.command {
        Command::Status => unreachable!("handled above"),

        Command::Holdings => {
            let native_price = match price_feed(&config) {
                Some(feed) => feed.fetch().await,
                None => None,
            };
            let reader = holdings_reader(&contracts);
            let holdings = reader.load(&provider, native_price).await;
            for h in &holdings.items {
                let usd = h
                    .usd_value
                    .map(|v| format!("${:.2}", v))
                    .unwrap_or_else(|| "-".into());
                println!(
                    "{:<12} {:>24} {:>14}  {}",
                    h.symbol,
                    group_thousands(&h.balance_display()),
                    usd,
                    h.name
                );
            }
            println!("total: ${:.2}", holdings.total_usd);
        }

        Command::Info { keep_pct } => {
            let info = TreasuryInfo {
                stable_token: contracts.stable_token.clone(),
                multisig: contracts.claim_destination.clone(),
                holder: contracts.treasury_holder.clone(),
            };
            let summary = info.summary(&provider).await;
            let d = summary.decimals;
            println!(
                "multisig:  {}",
                group_thousands(&summary.multisig_balance.format_units(d))
            );
            println!(
                "unclaimed: {}",
                group_thousands(&summary.performance_fees.format_units(d))
            );
            println!(
                "total:     {}",
                group_thousands(&summary.total.format_units(d))
            );
            if let Some(pct) = keep_pct {
                let bribe = suggested_bribe(summary.total, pct)
                    .map_err(|e| anyhow::anyhow!(e.user_message()))?;
                println!(
                    "suggested bribe (keep {pct}%): {}",
                    group_thousands(&bribe.format_units(d))
                );
            }
        }

        Command::Claim { token } => {
            run_claim(&provider, &config, &contracts, token).await?;
        }

        Command::Bribe { amount, token } => {
            let rewards = AddRewards {
                vault: contracts.reward_vault.clone(),
                stable_token: contracts.stable_token.clone(),
                yield_token: contracts.yield_token.clone(),
                chain: config.chain(),
            };
            let token = match token {
                BribeToken::Stable => RewardToken::Stable,
                BribeToken::Yield => RewardToken::Yield,
            };
            let receipt = rewards
                .fund(&provider, token, amount)
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message()))?;
            println!("vault funded: {}", tx_link(&config, &receipt.tx_hash));
        }

        Command::Unstake {
            amount,
            max_loss_bps,
        } => {
            let unstake = Unstake {
                staking: contracts.staking_contract.clone(),
                chain: config.chain(),
                decimals: 18,
            };
            let receipt = unstake
                .unstake(&provider, amount, *max_loss_bps)
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message()))?;
            println!("unstaked: {}", tx_link(&config, &receipt.tx_hash));
        }

        Command::UnstakeAll => {
            let unstake = Unstake {
                staking: contracts.staking_contract.clone(),
                chain: config.chain(),
                decimals: 18,
            };
            let receipt = unstake
                .unstake_all(&provider)
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message()))?;
            println!("unstaked all: {}", tx_link(&config, &receipt.tx_hash));
        }

        Command::Redeem {
            amount,
            slippage_bps,
        } => {
            let redeem = RedeemYield {
                token: contracts.yield_token.clone(),
                chain: config.chain(),
                ratio_bps: config.redeem_ratio_bps,
                output_decimals: 18,
            };
            let slippage = slippage_bps.unwrap_or(config.default_slippage_bps);
            let receipt = redeem
                .redeem(&provider, amount, slippage)
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message()))?;
            println!("redeemed: {}", tx_link(&config, &receipt.tx_hash));
        }

        Command::SetPubkeys { keys } => {
            let action = SetValidatorPubkeys {
                registry: contracts.validator_registry.clone(),
                chain: config.chain(),
            };
            let update = action
                .set(&provider, keys)
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message()))?;
            for warning in &update.length_warnings {
                println!("warning: {warning}");
            }
            println!(
                "registered {} key(s): {}",
                update.submitted.len(),
                tx_link(&config, &update.receipt.tx_hash)
            );
        }

        Command::QueueBoost { pubkey, amount } => {
            let action = QueueDropBoost {
                boost_token: contracts.boost_token.clone(),
                chain: config.chain(),
                explorer_base_url: config.explorer_base_url.clone(),
            };
            let receipt = action
                .queue(&provider, pubkey, amount)
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message()))?;
            println!("boost queued: {}", action.explorer_tx_url(&receipt.tx_hash));
        }

        Command::Burn { amount } => {
            let burn = BurnToken {
                token: contracts.governance_token.clone(),
                chain: config.chain(),
            };
            let supply = burn.supply(&provider).await;
            println!(
                "circulating before: {}",
                group_thousands(&supply.circulating.format_units(supply.decimals))
            );
            let receipt = burn
                .burn(&provider, amount)
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message()))?;
            println!("burned: {}", tx_link(&config, &receipt.tx_hash));
        }

        Command::Price { watch } => {
            let feed = price_feed(&config)
                .context("price_feed_pair is not configured")?;
            if !watch {
                match feed.fetch().await {
                    Some(price) => println!("${price}"),
                    None => println!("no price available"),
                }
                return Ok(());
            }
            let poller =
                PricePoller::spawn(feed, Duration::from_secs(config.price_refresh_secs));
            let mut updates = poller.subscribe();
            loop {
                tokio::select! {
                    changed = updates.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        match *updates.borrow() {
                            Some(price) => println!("${price}"),
                            None => println!("no price available"),
                        }
                    }
                    _ = tokio::signal::ctrl_c() => break,
                }
            }
        }
    }

    Ok(())
}
