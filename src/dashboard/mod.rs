//! Dashboard controller
//!
//! Owns the wallet gate and the view state. Every operation runs to
//! completion before the next one starts; the view is republished after each
//! change so a UI can render it.

pub mod actions;
pub mod claimable;
pub mod gate;
pub mod refresh;
pub mod state;

pub use gate::{ContractAddresses, WalletGate};
pub use state::{ActionPhase, ActionView, PendingAmount, ViewState, WriteAction};

use crate::error::{DashboardError, ErrorClassifier};
use crate::events::{Event, EventSender, EventType, Source};
use crate::logging::LogLevel;
use std::time::Duration;
use tokio::sync::watch;

/// User intents the controller acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerCommand {
    Connect,
    Refresh,
    Mint(PendingAmount),
    Claim,
    Withdraw,
}

pub struct Dashboard {
    gate: WalletGate,
    contracts: ContractAddresses,
    view: ViewState,
    view_sender: watch::Sender<ViewState>,
    events: EventSender,
    classifier: ErrorClassifier,
    poll_interval: Duration,
}

impl Dashboard {
    pub fn new(
        gate: WalletGate,
        contracts: ContractAddresses,
        events: EventSender,
    ) -> (Self, watch::Receiver<ViewState>) {
        let (view_sender, view_receiver) = watch::channel(ViewState::default());
        let dashboard = Self {
            gate,
            contracts,
            view: ViewState::default(),
            view_sender,
            events,
            classifier: ErrorClassifier::new(),
            poll_interval: crate::consts::cli_consts::wallet::receipt_poll_interval(),
        };
        (dashboard, view_receiver)
    }

    /// Override how often receipts are polled while confirming.
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Connect and load everything shown on first render.
    pub async fn start(&mut self) -> Result<(), DashboardError> {
        self.connect_wallet().await?;
        self.refresh_all().await
    }

    /// Run one user command. Failures are already reported as events.
    pub async fn execute(&mut self, command: ControllerCommand) -> Result<(), DashboardError> {
        match command {
            ControllerCommand::Connect => self.start().await,
            ControllerCommand::Refresh => self.refresh_all().await,
            ControllerCommand::Mint(amount) => self.mint(amount).await,
            ControllerCommand::Claim => self.claim().await,
            ControllerCommand::Withdraw => self.withdraw().await,
        }
    }

    fn publish(&self) {
        self.view_sender.send_replace(self.view.clone());
    }

    /// Log a failure. A wrong network additionally raises an alert.
    async fn report(&self, source: Source, context: &str, error: &DashboardError) {
        let level = self.classifier.classify(error);
        if let DashboardError::WrongNetwork { expected, .. } = error {
            self.events
                .send_wallet_event(
                    format!("Change the network to {}", expected),
                    EventType::Alert,
                    LogLevel::Warn,
                )
                .await;
        }
        let message = format!("{}: {}", context, error);
        let event = match source {
            Source::Wallet => Event::wallet_with_level(message, EventType::Error, level),
            Source::Query => Event::query_with_level(message, EventType::Error, level),
            Source::Transaction => Event::transaction_with_level(message, EventType::Error, level),
        };
        self.events.send_event(event).await;
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::harness;
    use super::*;
    use crate::test_utils::{FakeWallet, owner_address};
    use primitive_types::U256;

    #[tokio::test]
    /// Startup connects, then loads supply, balance, claimable and owner.
    async fn start_loads_the_whole_view() {
        let mut h = harness(
            FakeWallet::on_chain(4)
                .with_nfts(&[(1, false), (2, true), (3, false)])
                .with_token_balance(U256::exp10(19))
                .with_total_supply(U256::exp10(21))
                .with_owner(owner_address()),
        );
        h.dashboard.start().await.unwrap();

        let view = h.dashboard.view().clone();
        assert!(view.session.connected);
        assert!(view.session.is_owner);
        assert_eq!(view.session.account, Some(owner_address()));
        assert_eq!(view.claimable, 2);
        assert_eq!(view.token_balance, U256::exp10(19));
        assert_eq!(view.minted_supply, U256::exp10(21));
        assert_eq!(*h.views.borrow(), view);
    }

    #[tokio::test]
    /// On the wrong network nothing is queried, the view stays as it was,
    /// and the user is alerted.
    async fn wrong_network_alerts_and_leaves_view_untouched() {
        let mut h = harness(FakeWallet::on_chain(1));
        let before = h.dashboard.view().clone();

        let result = h.dashboard.start().await;
        assert!(matches!(result, Err(DashboardError::WrongNetwork { .. })));
        assert_eq!(h.wallet.call_count(), 0);
        assert_eq!(h.dashboard.view(), &before);

        let events = h.events();
        assert!(events.iter().any(|e| e.event_type == EventType::Alert
            && e.msg == "Change the network to Rinkeby"));
    }

    #[tokio::test]
    async fn execute_dispatches_commands() {
        let mut h = harness(FakeWallet::on_chain(4).with_total_supply(U256::from(5)));
        h.dashboard.execute(ControllerCommand::Connect).await.ok();
        assert!(h.dashboard.view().session.connected);
        assert_eq!(h.dashboard.view().minted_supply, U256::from(5));
    }
}
