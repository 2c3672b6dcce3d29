mod chain;
mod cli_messages;
mod config;
mod consts;
mod dashboard;
mod error;
mod events;
mod keys;
mod logging;
mod network;
mod runtime;
mod session;
#[cfg(test)]
mod test_utils;
mod ui;
mod units;
mod wallet;

use crate::config::{Config, Settings, clear_config, get_config_path};
use crate::consts::cli_consts::NETWORK_ENV_VAR;
use crate::dashboard::{ControllerCommand, PendingAmount};
use crate::network::Network;
use crate::session::{run_headless_mode, run_tui_mode, setup_session};
use crate::units::{format_ether, mint_price, parse_ether};
use crate::wallet::Address;
use clap::{Parser, Subcommand};
use primitive_types::U256;
use std::error::Error;
use std::path::Path;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Dashboard for the Crypto Devs token sale
struct Args {
    /// Network the sale is deployed on (rinkeby, goerli, sepolia, local).
    /// Falls back to the ICO_NETWORK environment variable, then rinkeby.
    #[arg(long, global = true, value_name = "NETWORK")]
    network: Option<Network>,

    /// Wallet JSON-RPC endpoint. Overrides the saved configuration.
    #[arg(long, global = true, value_name = "URL")]
    wallet_url: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Open the interactive dashboard
    Dashboard {
        /// Paint a solid background behind the dashboard
        #[arg(long, default_value_t = false)]
        with_background: bool,
    },
    /// Connect, load the sale state and print it
    Status,
    /// Buy tokens at 0.001 ether each
    Mint {
        /// Number of tokens to mint
        #[arg(long, value_name = "AMOUNT")]
        amount: PendingAmount,

        /// Refuse to mint if the payment would exceed this many ether
        #[arg(long, value_name = "ETH", value_parser = parse_ether)]
        max_cost: Option<U256>,
    },
    /// Claim 10 tokens for every NFT not yet claimed against
    Claim,
    /// Send the sale proceeds to the owner (owner only)
    Withdraw,
    /// Save the deployed contract addresses
    Configure {
        /// Address of the sale token contract
        #[arg(long, value_name = "ADDRESS")]
        token_contract: Address,

        /// Address of the NFT collection contract
        #[arg(long, value_name = "ADDRESS")]
        nft_contract: Address,
    },
    /// Delete the saved configuration
    ResetConfig,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let config_path = get_config_path()?;
    let network = args.network.unwrap_or_else(network_from_env);

    match args.command {
        Command::Configure {
            token_contract,
            nft_contract,
        } => {
            let mut config = Config::new(token_contract, nft_contract);
            config.wallet_url = args.wallet_url;
            config
                .save(&config_path)
                .map_err(|e| format!("Failed to save config: {}", e))?;
            print_cmd_success!(
                "Configuration saved",
                "{}",
                config_path.display()
            );
            Ok(())
        }
        Command::ResetConfig => {
            print_cmd_info!("Clearing configuration file...", "");
            clear_config(&config_path).map_err(Into::into)
        }
        Command::Dashboard { with_background } => {
            let settings = load_settings(&config_path, network, args.wallet_url)?;
            let session = setup_session(&settings)?;
            run_tui_mode(session, with_background).await
        }
        Command::Status => run_headless(&config_path, network, args.wallet_url, None).await,
        Command::Mint { amount, max_cost } => {
            let cost = mint_price(amount.get());
            if let Some(max_cost) = max_cost {
                if cost > max_cost {
                    return Err(format!(
                        "Minting {} tokens costs {} ETH, above --max-cost {} ETH",
                        amount,
                        format_ether(cost),
                        format_ether(max_cost)
                    )
                    .into());
                }
            }
            run_headless(
                &config_path,
                network,
                args.wallet_url,
                Some(ControllerCommand::Mint(amount)),
            )
            .await
        }
        Command::Claim => {
            run_headless(
                &config_path,
                network,
                args.wallet_url,
                Some(ControllerCommand::Claim),
            )
            .await
        }
        Command::Withdraw => {
            run_headless(
                &config_path,
                network,
                args.wallet_url,
                Some(ControllerCommand::Withdraw),
            )
            .await
        }
    }
}

/// Network from the environment, defaulting to Rinkeby.
fn network_from_env() -> Network {
    match std::env::var(NETWORK_ENV_VAR) {
        Ok(value) if !value.is_empty() => value.parse().unwrap_or_else(|e: String| {
            print_cmd_warn!("Ignoring network setting", "{}", e);
            Network::default()
        }),
        _ => Network::default(),
    }
}

fn load_settings(
    config_path: &Path,
    network: Network,
    wallet_url: Option<String>,
) -> Result<Settings, Box<dyn Error>> {
    let config = if config_path.exists() {
        Some(
            Config::load_from_file(config_path)
                .map_err(|e| format!("Failed to load config: {}", e))?,
        )
    } else {
        None
    };
    Ok(Settings::resolve(config.as_ref(), network, wallet_url)?)
}

async fn run_headless(
    config_path: &Path,
    network: Network,
    wallet_url: Option<String>,
    command: Option<ControllerCommand>,
) -> Result<(), Box<dyn Error>> {
    logging::init_console_logger();
    let settings = load_settings(config_path, network, wallet_url)?;
    let session = setup_session(&settings)?;
    run_headless_mode(session, command).await
}
