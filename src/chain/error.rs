//! Error handling for the contract bindings

use crate::chain::abi::AbiError;
use crate::wallet::TxHash;
use crate::wallet::error::WalletError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChainError {
    /// The wallet failed to answer a query or accept a transaction.
    #[error(transparent)]
    Wallet(#[from] WalletError),

    /// A contract returned data that does not decode as the declared type.
    #[error("Decoding error: {0}")]
    Abi(#[from] AbiError),

    /// The transaction was mined but the contract reverted it.
    #[error("Transaction {0} reverted")]
    Reverted(TxHash),
}
