//! Dashboard-level errors and their classification for logging

use crate::chain::ChainError;
use crate::logging::LogLevel;
use crate::network::Network;
use crate::wallet::error::WalletError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    /// The wallet is connected to a chain other than the supported one.
    #[error("Change the network to {expected} (wallet is on chain id {actual})")]
    WrongNetwork { expected: Network, actual: u64 },

    /// Connecting to the wallet failed.
    #[error(transparent)]
    Wallet(#[from] WalletError),

    /// A contract query or transaction failed.
    #[error(transparent)]
    Chain(#[from] ChainError),

    /// Withdrawal was requested from an account that does not own the sale.
    #[error("Only the sale owner can withdraw")]
    NotOwner,

    /// Required deployment settings are missing.
    #[error("Missing configuration: {0}")]
    MissingConfig(String),
}

impl DashboardError {
    fn wallet_error(&self) -> Option<&WalletError> {
        match self {
            DashboardError::Wallet(e) | DashboardError::Chain(ChainError::Wallet(e)) => Some(e),
            _ => None,
        }
    }

    /// Whether the user declined the request in their wallet.
    pub fn is_user_rejection(&self) -> bool {
        self.wallet_error()
            .is_some_and(WalletError::is_user_rejection)
    }
}

/// Maps errors to the level they are logged at.
#[derive(Debug, Clone)]
pub struct ErrorClassifier;

impl ErrorClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, error: &DashboardError) -> LogLevel {
        match error {
            // User-actionable: switch network, or they cancelled on purpose
            DashboardError::WrongNetwork { .. } | DashboardError::NotOwner => LogLevel::Warn,
            e if e.is_user_rejection() => LogLevel::Warn,

            // Wallet reachable but returned an error for this request
            DashboardError::Wallet(WalletError::Rpc { .. })
            | DashboardError::Chain(ChainError::Wallet(WalletError::Rpc { .. })) => LogLevel::Warn,

            // Critical: transport down, malformed data, reverts, setup
            DashboardError::Wallet(_) => LogLevel::Error,
            DashboardError::Chain(_) => LogLevel::Error,
            DashboardError::MissingConfig(_) => LogLevel::Error,
        }
    }
}

impl Default for ErrorClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::abi::AbiError;
    use crate::wallet::TxHash;
    use crate::wallet::error::USER_REJECTED_CODE;

    #[test]
    fn wrong_network_message_names_expected_network() {
        let err = DashboardError::WrongNetwork {
            expected: Network::Rinkeby,
            actual: 1,
        };
        assert_eq!(
            err.to_string(),
            "Change the network to Rinkeby (wallet is on chain id 1)"
        );
    }

    #[test]
    fn user_rejection_is_detected_through_chain_errors() {
        let err = DashboardError::Chain(ChainError::Wallet(WalletError::Rpc {
            code: USER_REJECTED_CODE,
            message: "User denied".to_string(),
        }));
        assert!(err.is_user_rejection());
        assert_eq!(ErrorClassifier::new().classify(&err), LogLevel::Warn);
    }

    #[test]
    fn classifies_failures() {
        let classifier = ErrorClassifier::default();
        assert_eq!(
            classifier.classify(&DashboardError::WrongNetwork {
                expected: Network::Local,
                actual: 4
            }),
            LogLevel::Warn
        );
        assert_eq!(
            classifier.classify(&DashboardError::Chain(ChainError::Reverted(
                TxHash::from_bytes([0; 32])
            ))),
            LogLevel::Error
        );
        assert_eq!(
            classifier.classify(&DashboardError::Chain(ChainError::Abi(
                AbiError::ShortData {
                    expected: 32,
                    actual: 0
                }
            ))),
            LogLevel::Error
        );
        assert_eq!(
            classifier.classify(&DashboardError::Wallet(WalletError::NoAccounts)),
            LogLevel::Error
        );
    }
}
