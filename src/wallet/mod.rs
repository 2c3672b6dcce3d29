use crate::wallet::error::WalletError;

pub(crate) mod client;
pub use client::JsonRpcWallet;
pub mod error;
pub mod types;

pub use types::{Address, CallRequest, TransactionReceipt, TransactionRequest, TxHash};

#[cfg(test)]
use mockall::{automock, predicate::*};

/// The wallet the dashboard talks to: an EIP-1193 style provider that owns
/// the user's keys, reports the active chain, answers queries and signs
/// transactions on the user's behalf.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait WalletProvider: Send + Sync {
    /// Ask the wallet for its accounts, prompting the user to connect if needed.
    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError>;

    /// The chain the wallet is currently connected to.
    async fn chain_id(&self) -> Result<u64, WalletError>;

    /// Execute a read-only contract call against the latest block.
    async fn call(&self, request: CallRequest) -> Result<Vec<u8>, WalletError>;

    /// Have the wallet sign and broadcast a transaction.
    async fn send_transaction(&self, request: TransactionRequest) -> Result<TxHash, WalletError>;

    /// Look up a transaction receipt. `None` until the transaction is mined.
    async fn transaction_receipt(
        &self,
        hash: TxHash,
    ) -> Result<Option<TransactionReceipt>, WalletError>;
}
