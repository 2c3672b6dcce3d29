use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// The chain the sale contracts are deployed on. Exactly one network is
/// supported per run; the wallet must be switched to it.
#[derive(Clone, Default, Copy, PartialEq, Eq)]
pub enum Network {
    /// Rinkeby test network.
    #[default]
    Rinkeby,
    /// Goerli test network.
    Goerli,
    /// Sepolia test network.
    Sepolia,
    /// Local development node (Hardhat / Anvil).
    Local,
}

impl Network {
    /// Returns the EIP-155 chain identifier the wallet must report.
    pub fn chain_id(&self) -> u64 {
        match self {
            Network::Rinkeby => 4,
            Network::Goerli => 5,
            Network::Sepolia => 11_155_111,
            Network::Local => 31_337,
        }
    }

    /// Returns the network matching a chain identifier, if it is a known one.
    pub fn from_chain_id(chain_id: u64) -> Option<Self> {
        [
            Network::Rinkeby,
            Network::Goerli,
            Network::Sepolia,
            Network::Local,
        ]
        .into_iter()
        .find(|network| network.chain_id() == chain_id)
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rinkeby" => Ok(Network::Rinkeby),
            "goerli" => Ok(Network::Goerli),
            "sepolia" => Ok(Network::Sepolia),
            "local" | "localhost" => Ok(Network::Local),
            other => Err(format!(
                "unknown network '{}', expected one of: rinkeby, goerli, sepolia, local",
                other
            )),
        }
    }
}

impl Display for Network {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Network::Rinkeby => write!(f, "Rinkeby"),
            Network::Goerli => write!(f, "Goerli"),
            Network::Sepolia => write!(f, "Sepolia"),
            Network::Local => write!(f, "Local"),
        }
    }
}

impl Debug for Network {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Network::{}, chain id: {}", self, self.chain_id())
    }
}
