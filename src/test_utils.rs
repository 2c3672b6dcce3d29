//! Shared test utilities: a scripted in-memory wallet that records every
//! request in the order it was made.

#![cfg(test)]

use crate::chain::abi::{self, Token};
use crate::chain::contracts::signatures;
use crate::wallet::error::WalletError;
use crate::wallet::{
    Address, CallRequest, TransactionReceipt, TransactionRequest, TxHash, WalletProvider,
};
use primitive_types::U256;
use std::collections::HashMap;
use std::sync::Mutex;

pub fn owner_address() -> Address {
    Address::from_bytes([0x11; 20])
}

pub fn token_address() -> Address {
    Address::from_bytes([0x22; 20])
}

pub fn nft_address() -> Address {
    Address::from_bytes([0x33; 20])
}

pub fn sent_hash() -> TxHash {
    TxHash::from_bytes([0x99; 32])
}

/// One request seen by the fake wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletOp {
    RequestAccounts,
    ChainId,
    Call { to: Address, selector: [u8; 4] },
    Send { selector: [u8; 4], value: U256 },
    Receipt,
}

impl WalletOp {
    pub fn call(to: Address, signature: &str) -> Self {
        WalletOp::Call {
            to,
            selector: abi::selector(signature),
        }
    }

    pub fn send(signature: &str, value: U256) -> Self {
        WalletOp::Send {
            selector: abi::selector(signature),
            value,
        }
    }
}

pub struct FakeWallet {
    chain_id: u64,
    accounts: Vec<Address>,
    responses: Mutex<HashMap<(Address, Vec<u8>), Vec<u8>>>,
    ops: Mutex<Vec<WalletOp>>,
    send_error_code: Option<i64>,
    reverts: bool,
    pending_polls: usize,
    polls: Mutex<usize>,
}

impl FakeWallet {
    /// A wallet on `chain_id` exposing [`owner_address`], holding nothing.
    pub fn on_chain(chain_id: u64) -> Self {
        let wallet = Self {
            chain_id,
            accounts: vec![owner_address()],
            responses: Mutex::new(HashMap::new()),
            ops: Mutex::new(Vec::new()),
            send_error_code: None,
            reverts: false,
            pending_polls: 0,
            polls: Mutex::new(0),
        };
        wallet.set_response(
            nft_address(),
            signatures::BALANCE_OF,
            &[Token::Address(owner_address())],
            Token::Uint(U256::zero()),
        );
        wallet
    }

    pub fn set_response(&self, to: Address, signature: &str, args: &[Token], value: Token) {
        let data = abi::encode_call(signature, args);
        self.responses
            .lock()
            .unwrap()
            .insert((to, data), abi::encode_word(value));
    }

    /// Hold NFTs `(token_id, claimed)` in index order.
    pub fn with_nfts(self, holdings: &[(u64, bool)]) -> Self {
        let owner = Token::Address(owner_address());
        self.set_response(
            nft_address(),
            signatures::BALANCE_OF,
            &[owner],
            Token::Uint(U256::from(holdings.len())),
        );
        for (index, (token_id, claimed)) in holdings.iter().enumerate() {
            self.set_response(
                nft_address(),
                signatures::TOKEN_OF_OWNER_BY_INDEX,
                &[owner, Token::Uint(U256::from(index))],
                Token::Uint(U256::from(*token_id)),
            );
            self.set_response(
                token_address(),
                signatures::TOKEN_IDS_CLAIMED,
                &[Token::Uint(U256::from(*token_id))],
                Token::Uint(U256::from(u8::from(*claimed))),
            );
        }
        self
    }

    /// Make the claimed-flag lookup for `token_id` fail.
    pub fn without_claimed_flag(self, token_id: u64) -> Self {
        let data = abi::encode_call(
            signatures::TOKEN_IDS_CLAIMED,
            &[Token::Uint(U256::from(token_id))],
        );
        self.responses
            .lock()
            .unwrap()
            .remove(&(token_address(), data));
        self
    }

    pub fn with_token_balance(self, balance: U256) -> Self {
        self.set_response(
            token_address(),
            signatures::BALANCE_OF,
            &[Token::Address(owner_address())],
            Token::Uint(balance),
        );
        self
    }

    pub fn with_total_supply(self, supply: U256) -> Self {
        self.set_response(
            token_address(),
            signatures::TOTAL_SUPPLY,
            &[],
            Token::Uint(supply),
        );
        self
    }

    pub fn with_owner(self, owner: Address) -> Self {
        self.set_response(
            token_address(),
            signatures::OWNER,
            &[],
            Token::Address(owner),
        );
        self
    }

    /// Expose `account` instead of [`owner_address`].
    pub fn with_account(mut self, account: Address) -> Self {
        self.accounts = vec![account];
        self
    }

    /// Answer every transaction with a JSON-RPC error carrying `code`.
    pub fn failing_transactions(mut self, code: i64) -> Self {
        self.send_error_code = Some(code);
        self
    }

    /// Mine every transaction with a failed status.
    pub fn reverting_transactions(mut self) -> Self {
        self.reverts = true;
        self
    }

    /// Report the transaction as pending for `polls` receipt lookups.
    pub fn with_pending_polls(mut self, polls: usize) -> Self {
        self.pending_polls = polls;
        self
    }

    fn record(&self, op: WalletOp) {
        self.ops.lock().unwrap().push(op);
    }

    pub fn ops(&self) -> Vec<WalletOp> {
        self.ops.lock().unwrap().clone()
    }

    /// Contract queries only, in order.
    pub fn calls(&self) -> Vec<WalletOp> {
        self.ops()
            .into_iter()
            .filter(|op| matches!(op, WalletOp::Call { .. }))
            .collect()
    }

    pub fn call_count(&self) -> usize {
        self.calls().len()
    }

    pub fn clear_ops(&self) {
        self.ops.lock().unwrap().clear();
    }
}

#[async_trait::async_trait]
impl WalletProvider for FakeWallet {
    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
        self.record(WalletOp::RequestAccounts);
        Ok(self.accounts.clone())
    }

    async fn chain_id(&self) -> Result<u64, WalletError> {
        self.record(WalletOp::ChainId);
        Ok(self.chain_id)
    }

    async fn call(&self, request: CallRequest) -> Result<Vec<u8>, WalletError> {
        let selector = [
            request.data[0],
            request.data[1],
            request.data[2],
            request.data[3],
        ];
        self.record(WalletOp::Call {
            to: request.to,
            selector,
        });
        self.responses
            .lock()
            .unwrap()
            .get(&(request.to, request.data))
            .cloned()
            .ok_or_else(|| WalletError::Rpc {
                code: -32000,
                message: "execution reverted".to_string(),
            })
    }

    async fn send_transaction(&self, request: TransactionRequest) -> Result<TxHash, WalletError> {
        let selector = [
            request.data[0],
            request.data[1],
            request.data[2],
            request.data[3],
        ];
        self.record(WalletOp::Send {
            selector,
            value: request.value,
        });
        match self.send_error_code {
            Some(code) => Err(WalletError::Rpc {
                code,
                message: "User denied transaction signature".to_string(),
            }),
            None => Ok(sent_hash()),
        }
    }

    async fn transaction_receipt(
        &self,
        hash: TxHash,
    ) -> Result<Option<TransactionReceipt>, WalletError> {
        self.record(WalletOp::Receipt);
        let mut polls = self.polls.lock().unwrap();
        *polls += 1;
        if *polls <= self.pending_polls {
            return Ok(None);
        }
        Ok(Some(TransactionReceipt {
            transaction_hash: hash,
            block_number: Some(1),
            status: Some(if self.reverts { 0 } else { 1 }),
        }))
    }
}
