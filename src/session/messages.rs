//! Session start, shutdown and summary output

use crate::consts::cli_consts::sale::MAX_TOTAL_SUPPLY;
use crate::dashboard::{ActionView, ViewState};
use crate::network::Network;
use crate::units::format_ether;

pub const COLOR_INFO: &str = "\x1b[1;36m"; // Bold Cyan
pub const COLOR_SUCCESS: &str = "\x1b[1;32m"; // Bold Green
pub const COLOR_RESET: &str = "\x1b[0m";

#[derive(Debug, Clone)]
pub enum SessionMessage {
    Info(String),
    Success(String),
}

impl SessionMessage {
    pub fn info(msg: impl Into<String>) -> Self {
        Self::Info(msg.into())
    }

    pub fn success(msg: impl Into<String>) -> Self {
        Self::Success(msg.into())
    }

    pub fn print(&self) {
        match self {
            Self::Info(msg) => {
                println!("{}[INFO]{} {}", COLOR_INFO, COLOR_RESET, msg);
            }
            Self::Success(msg) => {
                println!("{}[SUCCESS]{} {}", COLOR_SUCCESS, COLOR_RESET, msg);
            }
        }
    }
}

pub fn print_session_starting(mode: &str, network: Network, wallet_url: &str) {
    SessionMessage::info(format!(
        "Starting {} mode on {} via wallet at {}",
        mode, network, wallet_url
    ))
    .print();
}

pub fn print_session_shutdown() {
    SessionMessage::info("Shutting down...").print();
}

pub fn print_session_exit_success() {
    SessionMessage::success("ICO dashboard exited successfully").print();
}

/// The same lines the dashboard shows, as plain text.
pub fn summary_lines(view: &ViewState) -> Vec<String> {
    let mut lines = Vec::new();
    match view.session.account {
        Some(account) => lines.push(format!("Account: {}", account)),
        None => lines.push("Account: not connected".to_string()),
    }
    lines.push(format!(
        "You have minted {} Crypto Dev Tokens",
        format_ether(view.token_balance)
    ));
    lines.push(format!(
        "Overall {}/{} have been minted!!!",
        format_ether(view.minted_supply),
        MAX_TOTAL_SUPPLY
    ));
    match view.available_action() {
        ActionView::Connect => lines.push("Connect your wallet to continue".to_string()),
        ActionView::Loading => lines.push("Loading...".to_string()),
        ActionView::Withdraw => lines.push("You own the sale: withdraw is available".to_string()),
        ActionView::Claim { tokens } => lines.push(format!("{} Tokens can be claimed!", tokens)),
        ActionView::Mint => lines.push("Nothing to claim: mint is available".to_string()),
    }
    if view.stale {
        lines.push("Some values may be out of date; run `status` to refresh".to_string());
    }
    lines
}

pub fn print_summary(view: &ViewState) {
    for line in summary_lines(view) {
        SessionMessage::info(line).print();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::state::Session;
    use crate::wallet::Address;
    use primitive_types::U256;

    #[test]
    fn summary_reports_balances_in_whole_tokens() {
        let view = ViewState {
            session: Session {
                connected: true,
                is_owner: false,
                account: Some(Address::from_bytes([0xab; 20])),
            },
            claimable: 2,
            token_balance: U256::exp10(19),
            minted_supply: U256::exp10(18) * 250,
            ..ViewState::default()
        };
        let lines = summary_lines(&view);
        assert!(lines.contains(&"You have minted 10.0 Crypto Dev Tokens".to_string()));
        assert!(lines.contains(&"Overall 250.0/10000 have been minted!!!".to_string()));
        assert!(lines.contains(&"20 Tokens can be claimed!".to_string()));
    }

    #[test]
    fn disconnected_summary_asks_to_connect() {
        let lines = summary_lines(&ViewState::default());
        assert_eq!(lines[0], "Account: not connected");
        assert!(lines.contains(&"Connect your wallet to continue".to_string()));
    }
}
