//! Wallet and network gate
//!
//! Every read and write goes through here first: the wallet is asked for its
//! account and chain, and anything but the supported network stops the
//! operation before a single contract is queried.

use crate::chain::{NftContract, TokenContract, TokenWriter};
use crate::error::DashboardError;
use crate::network::Network;
use crate::wallet::error::WalletError;
use crate::wallet::{Address, WalletProvider};
use std::sync::Arc;

/// Deployed contract addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractAddresses {
    pub token: Address,
    pub nft: Address,
}

/// Query-only access for the connected account.
pub struct ReadHandle {
    provider: Arc<dyn WalletProvider>,
    account: Address,
}

impl ReadHandle {
    pub fn account(&self) -> Address {
        self.account
    }

    pub fn nft(&self, address: Address) -> NftContract<'_> {
        NftContract::new(self.provider.as_ref(), address)
    }

    pub fn token(&self, address: Address) -> TokenContract<'_> {
        TokenContract::new(self.provider.as_ref(), address)
    }
}

/// Transaction-signing access for the connected account.
pub struct SignerHandle {
    provider: Arc<dyn WalletProvider>,
    account: Address,
}

impl SignerHandle {
    pub fn account(&self) -> Address {
        self.account
    }

    pub fn token(&self, address: Address) -> TokenWriter<'_> {
        TokenWriter::new(self.provider.as_ref(), address, self.account)
    }
}

pub struct WalletGate {
    provider: Arc<dyn WalletProvider>,
    network: Network,
}

impl WalletGate {
    pub fn new(provider: Arc<dyn WalletProvider>, network: Network) -> Self {
        Self { provider, network }
    }

    pub fn network(&self) -> Network {
        self.network
    }

    /// Connect (prompting in the wallet if needed) and check the network.
    /// Returns the account the wallet exposes first.
    pub async fn connect(&self) -> Result<Address, DashboardError> {
        let accounts = self.provider.request_accounts().await?;
        let account = accounts.first().copied().ok_or(WalletError::NoAccounts)?;

        let chain_id = self.provider.chain_id().await?;
        if chain_id != self.network.chain_id() {
            log::warn!(
                "wallet is on {}, expected {}",
                Network::from_chain_id(chain_id)
                    .map(|network| network.to_string())
                    .unwrap_or_else(|| format!("chain id {}", chain_id)),
                self.network
            );
            return Err(DashboardError::WrongNetwork {
                expected: self.network,
                actual: chain_id,
            });
        }
        Ok(account)
    }

    pub async fn reader(&self) -> Result<ReadHandle, DashboardError> {
        let account = self.connect().await?;
        Ok(ReadHandle {
            provider: Arc::clone(&self.provider),
            account,
        })
    }

    pub async fn signer(&self) -> Result<SignerHandle, DashboardError> {
        let account = self.connect().await?;
        Ok(SignerHandle {
            provider: Arc::clone(&self.provider),
            account,
        })
    }
}
