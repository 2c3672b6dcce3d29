pub mod cli_consts {
    //! Dashboard Configuration Constants
    //!
    //! Sale parameters mirror the deployed token contract; changing them here
    //! does not change what the contract charges.

    // =============================================================================
    // QUEUE CONFIGURATION
    // =============================================================================

    /// The maximum number of events to keep in the activity logs.
    pub const MAX_ACTIVITY_LOGS: usize = 100;

    /// Event buffer size between the controller task and the UI.
    pub const EVENT_QUEUE_SIZE: usize = 100;

    /// Pending user commands the controller will queue before the UI blocks.
    pub const COMMAND_QUEUE_SIZE: usize = 16;

    // =============================================================================
    // SALE PARAMETERS
    // =============================================================================

    pub mod sale {
        /// Price of one token: 0.001 ether, in wei.
        pub const PRICE_PER_TOKEN_WEI: u64 = 1_000_000_000_000_000;

        /// Tokens granted per unclaimed NFT.
        pub const TOKENS_PER_NFT: u64 = 10;

        /// Maximum token supply, in whole tokens.
        pub const MAX_TOTAL_SUPPLY: u64 = 10_000;

        /// Decimals of both the native currency and the sale token.
        pub const DECIMALS: usize = 18;
    }

    // =============================================================================
    // WALLET CONFIGURATION
    // =============================================================================

    pub mod wallet {
        use std::time::Duration;

        /// Default wallet JSON-RPC endpoint (Frame desktop wallet).
        pub const DEFAULT_WALLET_URL: &str = "http://127.0.0.1:1248";

        /// TCP connect timeout for the wallet endpoint (seconds).
        /// No overall request timeout: account and signing requests wait on the user.
        pub const CONNECT_TIMEOUT_SECS: u64 = 10;

        /// Interval between transaction receipt polls (milliseconds).
        pub const RECEIPT_POLL_INTERVAL_MS: u64 = 2_000;

        pub const fn receipt_poll_interval() -> Duration {
            Duration::from_millis(RECEIPT_POLL_INTERVAL_MS)
        }
    }

    /// Environment variable selecting the supported network.
    pub const NETWORK_ENV_VAR: &str = "ICO_NETWORK";
}
