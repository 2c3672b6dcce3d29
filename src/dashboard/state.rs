//! View state derived from the chain, and the action it offers.

use crate::consts::cli_consts::sale::TOKENS_PER_NFT;
use crate::wallet::Address;
use primitive_types::U256;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

/// Connection facts for the current run. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub connected: bool,
    pub is_owner: bool,
    pub account: Option<Address>,
}

/// Progress of a write action (mint, claim, withdraw).
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, strum::Display)]
pub enum ActionPhase {
    #[default]
    Idle,
    /// Waiting for the wallet to sign and broadcast.
    Submitting,
    /// Broadcast, waiting for the first confirmation.
    Confirming,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum WriteAction {
    Mint,
    Claim,
    Withdraw,
}

/// Everything the dashboard shows, as of the last refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub session: Session,
    /// Owned NFTs whose tokens have not been claimed yet.
    pub claimable: u64,
    /// Connected account's token balance, in base units.
    pub token_balance: U256,
    /// Total tokens minted so far, in base units.
    pub minted_supply: U256,
    pub phase: ActionPhase,
    /// Set once a write is submitted; cleared by a complete refresh.
    pub stale: bool,
}

/// The single action the dashboard offers, by priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionView {
    /// No wallet connected yet.
    Connect,
    /// A write is in flight.
    Loading,
    /// The connected account owns the sale contract.
    Withdraw,
    /// Unclaimed NFTs are held; `tokens` is what claiming yields.
    Claim { tokens: u64 },
    /// Nothing to claim: offer to buy.
    Mint,
}

impl ViewState {
    pub fn busy(&self) -> bool {
        self.phase != ActionPhase::Idle
    }

    pub fn available_action(&self) -> ActionView {
        if !self.session.connected {
            ActionView::Connect
        } else if self.busy() {
            ActionView::Loading
        } else if self.session.is_owner {
            ActionView::Withdraw
        } else if self.claimable > 0 {
            ActionView::Claim {
                tokens: self.claimable * TOKENS_PER_NFT,
            }
        } else {
            ActionView::Mint
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PendingAmountError {
    #[error("'{0}' is not a whole number")]
    NotANumber(String),

    #[error("amount must be greater than zero")]
    NotPositive,
}

/// A number of tokens to mint. Always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingAmount(u64);

impl PendingAmount {
    pub fn new(amount: u64) -> Result<Self, PendingAmountError> {
        if amount == 0 {
            return Err(PendingAmountError::NotPositive);
        }
        Ok(Self(amount))
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl FromStr for PendingAmount {
    type Err = PendingAmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.starts_with('-') && trimmed[1..].chars().all(|c| c.is_ascii_digit()) {
            return Err(PendingAmountError::NotPositive);
        }
        let amount = trimmed
            .parse::<u64>()
            .map_err(|_| PendingAmountError::NotANumber(s.to_string()))?;
        Self::new(amount)
    }
}

impl Display for PendingAmount {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connected() -> ViewState {
        ViewState {
            session: Session {
                connected: true,
                is_owner: false,
                account: Some(Address::from_bytes([1; 20])),
            },
            ..ViewState::default()
        }
    }

    #[test]
    fn pending_amount_must_be_positive() {
        assert_eq!(PendingAmount::new(0), Err(PendingAmountError::NotPositive));
        assert_eq!("0".parse::<PendingAmount>(), Err(PendingAmountError::NotPositive));
        assert_eq!("-3".parse::<PendingAmount>(), Err(PendingAmountError::NotPositive));
        assert!(matches!(
            "".parse::<PendingAmount>(),
            Err(PendingAmountError::NotANumber(_))
        ));
        assert!(matches!(
            "1.5".parse::<PendingAmount>(),
            Err(PendingAmountError::NotANumber(_))
        ));
        assert_eq!(" 5 ".parse::<PendingAmount>().unwrap().get(), 5);
    }

    #[test]
    fn disconnected_offers_connect() {
        assert_eq!(ViewState::default().available_action(), ActionView::Connect);
    }

    #[test]
    fn busy_hides_every_action() {
        let mut view = connected();
        view.session.is_owner = true;
        view.claimable = 2;
        view.phase = ActionPhase::Confirming;
        assert_eq!(view.available_action(), ActionView::Loading);
    }

    #[test]
    fn owner_gets_withdraw_before_claim() {
        let mut view = connected();
        view.session.is_owner = true;
        view.claimable = 2;
        assert_eq!(view.available_action(), ActionView::Withdraw);
    }

    #[test]
    fn claim_shows_ten_tokens_per_nft() {
        let mut view = connected();
        view.claimable = 2;
        assert_eq!(view.available_action(), ActionView::Claim { tokens: 20 });
    }

    #[test]
    fn nothing_to_claim_offers_mint() {
        assert_eq!(connected().available_action(), ActionView::Mint);
    }
}
