//! Application configuration.

use crate::consts::cli_consts::wallet::DEFAULT_WALLET_URL;
use crate::dashboard::ContractAddresses;
use crate::error::DashboardError;
use crate::network::Network;
use crate::wallet::Address;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::{fs, path::Path};

/// Where the sale contracts live, saved by `configure`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub token_contract: Address,
    pub nft_contract: Address,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_url: Option<String>,
}

impl Config {
    pub fn new(token_contract: Address, nft_contract: Address) -> Self {
        Config {
            token_contract,
            nft_contract,
            wallet_url: None,
        }
    }

    /// Loads configuration from a JSON file at the given path.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if reading from file fails or JSON is invalid.
    pub fn load_from_file(path: &Path) -> Result<Self, std::io::Error> {
        let buf = fs::read(path)?;
        let config: Config = serde_json::from_slice(&buf)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(config)
    }

    /// Saves the configuration to a JSON file at the given path.
    ///
    /// Directories will be created if they don't exist. This method overwrites existing files.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Serialization failed: {}", e),
            )
        })?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn contracts(&self) -> ContractAddresses {
        ContractAddresses {
            token: self.token_contract,
            nft: self.nft_contract,
        }
    }
}

/// `~/.ico-dashboard/config.json`
pub fn get_config_path() -> Result<PathBuf, std::io::Error> {
    let home_path = home::home_dir().ok_or(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        "Home directory not found",
    ))?;
    Ok(home_path.join(".ico-dashboard").join("config.json"))
}

/// Delete the configuration file. A missing file is not an error.
pub fn clear_config(path: &Path) -> std::io::Result<()> {
    if !path.ends_with("config.json") {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "Path must end with config.json",
        ));
    }

    if !path.exists() {
        println!("No config file found at {}", path.display());
        return Ok(());
    }

    fs::remove_file(path)
}

/// Everything a session needs, after flags, environment and file are merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub network: Network,
    pub wallet_url: String,
    pub contracts: ContractAddresses,
}

impl Settings {
    /// Merge the saved config with command-line overrides. The wallet URL
    /// comes from the flag, then the file, then the default.
    pub fn resolve(
        config: Option<&Config>,
        network: Network,
        wallet_url: Option<String>,
    ) -> Result<Self, DashboardError> {
        let config = config.ok_or_else(|| {
            DashboardError::MissingConfig(
                "contract addresses; run `ico-dashboard configure` first".to_string(),
            )
        })?;
        let wallet_url = wallet_url
            .or_else(|| config.wallet_url.clone())
            .unwrap_or_else(|| DEFAULT_WALLET_URL.to_string());
        Ok(Self {
            network,
            wallet_url,
            contracts: config.contracts(),
        })
    }
}
