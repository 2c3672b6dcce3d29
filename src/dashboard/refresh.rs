//! Read paths: connect the wallet and reload the values the view shows.
//!
//! A wrong network leaves the view exactly as it was. Any other failure
//! resets the value being refreshed to zero.

use super::claimable::claimable_balance;
use super::state::WriteAction;
use super::{Dashboard, ViewState};
use crate::error::DashboardError;
use crate::events::{EventType, Source};
use crate::logging::LogLevel;
use crate::wallet::Address;
use primitive_types::U256;

impl Dashboard {
    /// Ask the wallet for an account on the supported network.
    pub async fn connect_wallet(&mut self) -> Result<(), DashboardError> {
        match self.gate.connect().await {
            Ok(account) => {
                self.view.session.connected = true;
                self.view.session.account = Some(account);
                self.publish();
                self.events
                    .send_wallet_event(
                        format!("Connected {} on {}", account, self.gate.network()),
                        EventType::Success,
                        LogLevel::Info,
                    )
                    .await;
                Ok(())
            }
            Err(e) => {
                self.report(Source::Wallet, "Wallet connection failed", &e)
                    .await;
                Err(e)
            }
        }
    }

    pub async fn refresh_token_balance(&mut self) -> Result<(), DashboardError> {
        let result = self.read_token_balance().await;
        self.settle("token balance", result, U256::zero(), |view, balance| {
            view.token_balance = balance
        })
        .await
    }

    pub async fn refresh_minted_supply(&mut self) -> Result<(), DashboardError> {
        let result = self.read_minted_supply().await;
        self.settle("minted supply", result, U256::zero(), |view, supply| {
            view.minted_supply = supply
        })
        .await
    }

    pub async fn refresh_claimable(&mut self) -> Result<(), DashboardError> {
        let result = self.read_claimable().await;
        self.settle("claimable balance", result, 0, |view, claimable| {
            view.claimable = claimable
        })
        .await
    }

    /// Compare the sale owner with the connected account.
    pub async fn refresh_owner(&mut self) -> Result<(), DashboardError> {
        let result = self.read_is_owner().await;
        self.settle("owner", result, false, |view, is_owner| {
            view.session.is_owner = is_owner
        })
        .await
    }

    /// Reload everything shown on first render: supply, balance, claimable,
    /// then the owner check. Every step runs even if an earlier one fails.
    pub async fn refresh_all(&mut self) -> Result<(), DashboardError> {
        let results = [
            self.refresh_minted_supply().await,
            self.refresh_token_balance().await,
            self.refresh_claimable().await,
            self.refresh_owner().await,
        ];
        self.finish_refresh(results).await
    }

    /// Reload what a confirmed write can have changed.
    pub(super) async fn refresh_after(
        &mut self,
        action: WriteAction,
    ) -> Result<(), DashboardError> {
        match action {
            WriteAction::Mint | WriteAction::Claim => {
                let results = [
                    self.refresh_token_balance().await,
                    self.refresh_minted_supply().await,
                    self.refresh_claimable().await,
                ];
                self.finish_refresh(results).await
            }
            WriteAction::Withdraw => {
                let results = [self.refresh_owner().await];
                self.finish_refresh(results).await
            }
        }
    }

    /// Clear the stale flag once every step succeeded, else surface the
    /// first failure.
    async fn finish_refresh<const N: usize>(
        &mut self,
        results: [Result<(), DashboardError>; N],
    ) -> Result<(), DashboardError> {
        if let Some(error) = results.into_iter().find_map(Result::err) {
            return Err(error);
        }
        if self.view.stale {
            self.view.stale = false;
            self.publish();
        }
        Ok(())
    }

    async fn settle<T: Send>(
        &mut self,
        what: &str,
        result: Result<T, DashboardError>,
        reset: T,
        apply: impl FnOnce(&mut ViewState, T) + Send,
    ) -> Result<(), DashboardError> {
        match result {
            Ok(value) => {
                apply(&mut self.view, value);
                self.publish();
                self.events
                    .send_query_event(
                        format!("Refreshed {}", what),
                        EventType::Refresh,
                        LogLevel::Debug,
                    )
                    .await;
                Ok(())
            }
            Err(e) => {
                if !matches!(e, DashboardError::WrongNetwork { .. }) {
                    apply(&mut self.view, reset);
                    self.publish();
                }
                self.report(Source::Query, &format!("Could not refresh {}", what), &e)
                    .await;
                Err(e)
            }
        }
    }

    async fn read_token_balance(&self) -> Result<U256, DashboardError> {
        let reader = self.gate.reader().await?;
        let balance = reader
            .token(self.contracts.token)
            .balance_of(reader.account())
            .await?;
        Ok(balance)
    }

    async fn read_minted_supply(&self) -> Result<U256, DashboardError> {
        let reader = self.gate.reader().await?;
        let supply = reader.token(self.contracts.token).total_supply().await?;
        Ok(supply)
    }

    async fn read_claimable(&self) -> Result<u64, DashboardError> {
        let reader = self.gate.reader().await?;
        let nft = reader.nft(self.contracts.nft);
        let token = reader.token(self.contracts.token);
        let claimable = claimable_balance(&nft, &token, reader.account()).await?;
        Ok(claimable)
    }

    async fn read_is_owner(&self) -> Result<bool, DashboardError> {
        let reader = self.gate.reader().await?;
        let owner: Address = reader.token(self.contracts.token).owner().await?;
        Ok(owner == reader.account())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::harness;
    use crate::chain::contracts::signatures;
    use crate::error::DashboardError;
    use crate::test_utils::{FakeWallet, WalletOp, owner_address, token_address};
    use crate::wallet::Address;
    use primitive_types::U256;
    use std::str::FromStr;

    #[tokio::test]
    /// The owner check compares addresses, not their spelling.
    async fn owner_check_ignores_address_case() {
        let account = Address::from_str("0xabcdefabcdefabcdefabcdefabcdefabcdefabcd").unwrap();
        let owner = Address::from_str("0xABCDEFabcdefABCDEFabcdefABCDEFabcdefABCD").unwrap();
        let mut h = harness(FakeWallet::on_chain(4).with_account(account).with_owner(owner));
        h.dashboard.refresh_owner().await.unwrap();
        assert!(h.dashboard.view().session.is_owner);
    }

    #[tokio::test]
    /// A different owner clears a previously set owner flag.
    async fn owner_flag_follows_the_contract() {
        let mut h = harness(FakeWallet::on_chain(4).with_owner(owner_address()));
        h.dashboard.refresh_owner().await.unwrap();
        assert!(h.dashboard.view().session.is_owner);

        h.wallet.set_response(
            token_address(),
            signatures::OWNER,
            &[],
            crate::chain::abi::Token::Address(Address::from_bytes([0x44; 20])),
        );
        h.dashboard.refresh_owner().await.unwrap();
        assert!(!h.dashboard.view().session.is_owner);
    }

    #[tokio::test]
    /// A failed read resets that value instead of keeping the old one.
    async fn failed_read_resets_value() {
        let mut h = harness(FakeWallet::on_chain(4).with_token_balance(U256::exp10(18)));
        h.dashboard.refresh_token_balance().await.unwrap();
        assert_eq!(h.dashboard.view().token_balance, U256::exp10(18));

        // totalSupply has no scripted answer, so it fails
        let result = h.dashboard.refresh_minted_supply().await;
        assert!(matches!(result, Err(DashboardError::Chain(_))));
        assert_eq!(h.dashboard.view().minted_supply, U256::zero());
        assert_eq!(h.dashboard.view().token_balance, U256::exp10(18));
    }

    #[tokio::test]
    /// Startup refresh runs every step even when one of them fails.
    async fn refresh_all_keeps_going_after_a_failure() {
        let mut h = harness(FakeWallet::on_chain(4).with_owner(owner_address()));
        let result = h.dashboard.refresh_all().await;
        assert!(result.is_err());
        assert!(h.dashboard.view().session.is_owner);
        assert_eq!(
            h.wallet.calls(),
            vec![
                WalletOp::call(token_address(), signatures::TOTAL_SUPPLY),
                WalletOp::call(token_address(), signatures::BALANCE_OF),
                WalletOp::call(crate::test_utils::nft_address(), signatures::BALANCE_OF),
                WalletOp::call(token_address(), signatures::OWNER),
            ]
        );
    }

    #[tokio::test]
    async fn wrong_network_keeps_previous_values() {
        let mut h = harness(FakeWallet::on_chain(4).with_token_balance(U256::from(7)));
        h.dashboard.refresh_token_balance().await.unwrap();

        let mut other = harness(FakeWallet::on_chain(5));
        other.dashboard.view = h.dashboard.view().clone();
        let result = other.dashboard.refresh_token_balance().await;
        assert!(matches!(result, Err(DashboardError::WrongNetwork { .. })));
        assert_eq!(other.dashboard.view().token_balance, U256::from(7));
        assert_eq!(other.wallet.call_count(), 0);
    }
}
