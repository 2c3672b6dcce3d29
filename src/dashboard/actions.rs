//! Write paths: mint, claim and withdraw.
//!
//! Each write moves through Submitting and Confirming and always returns to
//! Idle, whether it succeeded or not. The view is marked stale from
//! submission until a full refresh completes.

use super::state::{ActionPhase, PendingAmount, WriteAction};
use super::Dashboard;
use crate::chain::PendingTransaction;
use crate::error::DashboardError;
use crate::events::{Event, EventType, Source};
use crate::logging::LogLevel;
use crate::units::{format_ether, mint_price};
use crate::wallet::TransactionReceipt;
use primitive_types::U256;

impl Dashboard {
    /// Buy `amount` tokens at the fixed sale price.
    pub async fn mint(&mut self, amount: PendingAmount) -> Result<(), DashboardError> {
        let value = mint_price(amount.get());
        self.events
            .send_transaction_event(
                format!(
                    "Minting {} tokens for {} ETH",
                    amount,
                    format_ether(value)
                ),
                EventType::Waiting,
                LogLevel::Info,
            )
            .await;
        self.write(WriteAction::Mint, amount.get(), value).await
    }

    /// Claim the tokens owed for every unclaimed NFT held.
    pub async fn claim(&mut self) -> Result<(), DashboardError> {
        self.write(WriteAction::Claim, 0, U256::zero()).await
    }

    /// Move the sale proceeds to the owner. Refused for anyone else.
    pub async fn withdraw(&mut self) -> Result<(), DashboardError> {
        if !self.view.session.is_owner {
            let error = DashboardError::NotOwner;
            self.report(Source::Transaction, "Withdraw refused", &error)
                .await;
            return Err(error);
        }
        self.write(WriteAction::Withdraw, 0, U256::zero()).await
    }

    async fn write(
        &mut self,
        action: WriteAction,
        amount: u64,
        value: U256,
    ) -> Result<(), DashboardError> {
        let result = self.submit_and_confirm(action, amount, value).await;
        self.set_phase(ActionPhase::Idle).await;

        match result {
            Ok(receipt) => {
                self.events
                    .send_transaction_event(
                        format!(
                            "{} confirmed in block {}",
                            action,
                            receipt.block_number.unwrap_or_default()
                        ),
                        EventType::Success,
                        LogLevel::Info,
                    )
                    .await;
                if let Some(message) = success_alert(action) {
                    self.events
                        .send_transaction_event(message.to_string(), EventType::Alert, LogLevel::Info)
                        .await;
                }
                // The write is on chain; a failed reload is reported and
                // leaves the view stale but does not undo that
                if let Err(e) = self.refresh_after(action).await {
                    log::debug!("refresh after {} failed: {}", action, e);
                }
                Ok(())
            }
            Err(e) => {
                let context = if e.is_user_rejection() {
                    format!("{} cancelled in wallet", action)
                } else {
                    format!("{} failed", action)
                };
                self.report(Source::Transaction, &context, &e)
                    .await;
                Err(e)
            }
        }
    }

    async fn submit_and_confirm(
        &mut self,
        action: WriteAction,
        amount: u64,
        value: U256,
    ) -> Result<TransactionReceipt, DashboardError> {
        // Network check happens before anything in the view changes
        let signer = self.gate.signer().await?;
        log::debug!("{} from {}", action, signer.account());
        let writer = signer.token(self.contracts.token);

        self.view.stale = true;
        self.set_phase(ActionPhase::Submitting).await;

        let pending: PendingTransaction<'_> = match action {
            WriteAction::Mint => writer.mint(amount, value).await?,
            WriteAction::Claim => writer.claim().await?,
            WriteAction::Withdraw => writer.withdraw().await?,
        };

        self.events
            .send_transaction_event(
                format!("{} sent as {}, waiting for confirmation", action, pending.hash()),
                EventType::Waiting,
                LogLevel::Info,
            )
            .await;
        self.set_phase(ActionPhase::Confirming).await;

        Ok(pending.wait(self.poll_interval).await?)
    }

    async fn set_phase(&mut self, phase: ActionPhase) {
        if self.view.phase == phase {
            return;
        }
        self.view.phase = phase;
        self.publish();
        self.events
            .send_event(Event::state_change(phase, format!("Transaction {}", phase)))
            .await;
    }
}

fn success_alert(action: WriteAction) -> Option<&'static str> {
    match action {
        WriteAction::Mint => Some("Successfully minted Crypto Dev Tokens"),
        WriteAction::Claim => Some("Successfully claimed Crypto Dev Tokens"),
        WriteAction::Withdraw => None,
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::harness;
    use super::*;
    use crate::chain::contracts::signatures;
    use crate::test_utils::{FakeWallet, WalletOp, nft_address, owner_address, token_address};
    use crate::units::parse_ether;
    use crate::wallet::error::USER_REJECTED_CODE;

    fn sale_wallet() -> FakeWallet {
        FakeWallet::on_chain(4)
            .with_token_balance(U256::exp10(18))
            .with_total_supply(U256::exp10(20))
            .with_owner(crate::wallet::Address::from_bytes([0x44; 20]))
    }

    #[tokio::test]
    /// Minting 5 pays 0.005 ether, then refreshes balance, supply and
    /// claimable exactly once each, after confirmation.
    async fn mint_pays_and_refreshes_after_confirmation() {
        let mut h = harness(sale_wallet().with_pending_polls(2));
        h.dashboard.start().await.unwrap();
        h.wallet.clear_ops();

        h.dashboard
            .mint(PendingAmount::new(5).unwrap())
            .await
            .unwrap();

        let ops = h.wallet.ops();
        let send = WalletOp::send(signatures::MINT, parse_ether("0.005").unwrap());
        assert_eq!(ops.iter().filter(|op| **op == send).count(), 1);

        let last_receipt = ops
            .iter()
            .rposition(|op| *op == WalletOp::Receipt)
            .unwrap();
        assert_eq!(
            ops.iter().filter(|op| **op == WalletOp::Receipt).count(),
            3
        );
        let refreshes: Vec<WalletOp> = ops[last_receipt + 1..]
            .iter()
            .filter(|op| matches!(op, WalletOp::Call { .. }))
            .cloned()
            .collect();
        assert_eq!(
            refreshes,
            vec![
                WalletOp::call(token_address(), signatures::BALANCE_OF),
                WalletOp::call(token_address(), signatures::TOTAL_SUPPLY),
                WalletOp::call(nft_address(), signatures::BALANCE_OF),
            ]
        );

        let view = h.dashboard.view();
        assert_eq!(view.phase, ActionPhase::Idle);
        assert!(!view.stale);
    }

    #[tokio::test]
    /// Once the receipt confirms, the mint succeeds even if a reload fails.
    async fn confirmed_mint_succeeds_when_refresh_fails() {
        let mut h = harness(sale_wallet().with_nfts(&[(7, false)]).without_claimed_flag(7));
        h.dashboard.start().await.ok();
        h.wallet.clear_ops();
        h.events();

        let result = h.dashboard.mint(PendingAmount::new(1).unwrap()).await;
        assert!(result.is_ok());
        assert_eq!(
            h.wallet
                .ops()
                .iter()
                .filter(|op| matches!(op, WalletOp::Send { .. }))
                .count(),
            1
        );

        let view = h.dashboard.view();
        assert_eq!(view.phase, ActionPhase::Idle);
        assert_eq!(view.claimable, 0);
        assert!(view.stale);
        assert!(h.events().iter().any(|e| e.event_type == EventType::Error
            && e.msg.starts_with("Could not refresh claimable balance")));
    }

    #[tokio::test]
    /// The phase is published as Submitting, then Confirming, then Idle.
    async fn phases_are_reported_in_order() {
        let mut h = harness(sale_wallet());
        h.dashboard.start().await.unwrap();
        h.events();

        h.dashboard.claim().await.unwrap();
        let phases: Vec<ActionPhase> = h.events().iter().filter_map(|e| e.phase).collect();
        assert_eq!(
            phases,
            vec![
                ActionPhase::Submitting,
                ActionPhase::Confirming,
                ActionPhase::Idle
            ]
        );
    }

    #[tokio::test]
    async fn mint_success_raises_alert() {
        let mut h = harness(sale_wallet());
        h.dashboard.start().await.unwrap();
        h.events();

        h.dashboard
            .mint(PendingAmount::new(1).unwrap())
            .await
            .unwrap();
        assert!(h.events().iter().any(|e| e.event_type == EventType::Alert
            && e.msg == "Successfully minted Crypto Dev Tokens"));
    }

    #[tokio::test]
    /// A rejected signature returns to Idle, leaves the view stale, and
    /// refreshes nothing.
    async fn rejection_clears_busy_and_keeps_stale() {
        let mut h = harness(sale_wallet().failing_transactions(USER_REJECTED_CODE));
        h.dashboard.start().await.unwrap();
        h.wallet.clear_ops();

        let result = h.dashboard.mint(PendingAmount::new(2).unwrap()).await;
        assert!(result.unwrap_err().is_user_rejection());

        let view = h.dashboard.view();
        assert_eq!(view.phase, ActionPhase::Idle);
        assert!(!view.busy());
        assert!(view.stale);
        assert_eq!(h.wallet.call_count(), 0);
    }

    #[tokio::test]
    async fn revert_clears_busy() {
        let mut h = harness(sale_wallet().reverting_transactions());
        h.dashboard.start().await.unwrap();

        let result = h.dashboard.claim().await;
        assert!(matches!(
            result,
            Err(DashboardError::Chain(crate::chain::ChainError::Reverted(_)))
        ));
        assert!(!h.dashboard.view().busy());
        assert!(h.dashboard.view().stale);
    }

    #[tokio::test]
    /// On the wrong network a write is refused before the view changes.
    async fn wrong_network_write_leaves_view_alone() {
        let mut h = harness(FakeWallet::on_chain(11_155_111));
        let before = h.dashboard.view().clone();

        let result = h.dashboard.claim().await;
        assert!(matches!(result, Err(DashboardError::WrongNetwork { .. })));
        assert_eq!(h.dashboard.view(), &before);
        assert!(!h
            .wallet
            .ops()
            .iter()
            .any(|op| matches!(op, WalletOp::Send { .. } | WalletOp::Call { .. })));
    }

    #[tokio::test]
    /// Withdraw is offered to the owner and refreshes only the owner check.
    async fn owner_withdraws_and_rechecks_owner() {
        let mut h = harness(sale_wallet().with_owner(owner_address()));
        h.dashboard.start().await.unwrap();
        assert_eq!(
            h.dashboard.view().available_action(),
            super::super::ActionView::Withdraw
        );
        h.wallet.clear_ops();

        h.dashboard.withdraw().await.unwrap();
        assert_eq!(
            h.wallet.calls(),
            vec![WalletOp::call(token_address(), signatures::OWNER)]
        );
        assert!(h
            .wallet
            .ops()
            .contains(&WalletOp::send(signatures::WITHDRAW, U256::zero())));
    }

    #[tokio::test]
    async fn non_owner_cannot_withdraw() {
        let mut h = harness(sale_wallet());
        h.dashboard.start().await.unwrap();
        h.wallet.clear_ops();

        assert!(matches!(
            h.dashboard.withdraw().await,
            Err(DashboardError::NotOwner)
        ));
        assert!(h.wallet.ops().is_empty());
    }
}
