//! Error handling for the wallet module

use thiserror::Error;

/// JSON-RPC error code a wallet returns when the user declines a request (EIP-1193).
pub const USER_REJECTED_CODE: i64 = 4001;

#[derive(Debug, Error)]
pub enum WalletError {
    /// Reqwest error, typically related to network issues or request failures.
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// The wallet endpoint answered with a non-success HTTP status.
    #[error("HTTP error with status {status}: {message}")]
    Http { status: u16, message: String },

    /// The wallet answered with a JSON-RPC error object.
    #[error("JSON-RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// The response did not have the shape the method promises.
    #[error("Malformed wallet response: {0}")]
    Malformed(String),

    /// The wallet is reachable but exposes no account.
    #[error("Wallet returned no accounts")]
    NoAccounts,
}

impl WalletError {
    pub async fn from_response(response: reqwest::Response) -> WalletError {
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read response text".to_string());

        WalletError::Http { status, message }
    }

    /// Whether the user declined the request in their wallet.
    pub fn is_user_rejection(&self) -> bool {
        matches!(self, WalletError::Rpc { code, .. } if *code == USER_REJECTED_CODE)
    }
}
