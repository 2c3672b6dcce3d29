//! Typed bindings for the NFT and sale-token contracts.

use crate::chain::abi::{self, Token};
use crate::chain::error::ChainError;
use crate::wallet::{
    Address, CallRequest, TransactionReceipt, TransactionRequest, TxHash, WalletProvider,
};
use primitive_types::U256;
use std::time::Duration;

pub mod signatures {
    pub const BALANCE_OF: &str = "balanceOf(address)";
    pub const TOKEN_OF_OWNER_BY_INDEX: &str = "tokenOfOwnerByIndex(address,uint256)";
    pub const TOTAL_SUPPLY: &str = "totalSupply()";
    pub const OWNER: &str = "owner()";
    pub const TOKEN_IDS_CLAIMED: &str = "tokenIdsClaimed(uint256)";
    pub const MINT: &str = "mint(uint256)";
    pub const CLAIM: &str = "claim()";
    pub const WITHDRAW: &str = "withdraw()";
}

async fn call(
    provider: &dyn WalletProvider,
    to: Address,
    signature: &str,
    args: &[Token],
) -> Result<Vec<u8>, ChainError> {
    let data = abi::encode_call(signature, args);
    Ok(provider.call(CallRequest { to, data }).await?)
}

/// The collectible (ERC-721 enumerable) contract whose holders may claim tokens.
pub struct NftContract<'a> {
    provider: &'a dyn WalletProvider,
    address: Address,
}

impl<'a> NftContract<'a> {
    pub fn new(provider: &'a dyn WalletProvider, address: Address) -> Self {
        Self { provider, address }
    }

    /// Number of NFTs held by `owner`.
    pub async fn balance_of(&self, owner: Address) -> Result<U256, ChainError> {
        let data = call(
            self.provider,
            self.address,
            signatures::BALANCE_OF,
            &[Token::Address(owner)],
        )
        .await?;
        Ok(abi::decode_uint(&data)?)
    }

    /// Identifier of the `index`-th NFT held by `owner`.
    pub async fn token_of_owner_by_index(
        &self,
        owner: Address,
        index: U256,
    ) -> Result<U256, ChainError> {
        let data = call(
            self.provider,
            self.address,
            signatures::TOKEN_OF_OWNER_BY_INDEX,
            &[Token::Address(owner), Token::Uint(index)],
        )
        .await?;
        Ok(abi::decode_uint(&data)?)
    }
}

/// Read-only view of the sale token contract.
pub struct TokenContract<'a> {
    provider: &'a dyn WalletProvider,
    address: Address,
}

impl<'a> TokenContract<'a> {
    pub fn new(provider: &'a dyn WalletProvider, address: Address) -> Self {
        Self { provider, address }
    }

    pub async fn balance_of(&self, owner: Address) -> Result<U256, ChainError> {
        let data = call(
            self.provider,
            self.address,
            signatures::BALANCE_OF,
            &[Token::Address(owner)],
        )
        .await?;
        Ok(abi::decode_uint(&data)?)
    }

    pub async fn total_supply(&self) -> Result<U256, ChainError> {
        let data = call(self.provider, self.address, signatures::TOTAL_SUPPLY, &[]).await?;
        Ok(abi::decode_uint(&data)?)
    }

    pub async fn owner(&self) -> Result<Address, ChainError> {
        let data = call(self.provider, self.address, signatures::OWNER, &[]).await?;
        Ok(abi::decode_address(&data)?)
    }

    /// Whether tokens were already claimed for NFT `token_id`.
    pub async fn token_ids_claimed(&self, token_id: U256) -> Result<bool, ChainError> {
        let data = call(
            self.provider,
            self.address,
            signatures::TOKEN_IDS_CLAIMED,
            &[Token::Uint(token_id)],
        )
        .await?;
        Ok(abi::decode_bool(&data)?)
    }
}

/// State-changing calls on the sale token contract, sent from `from`.
pub struct TokenWriter<'a> {
    provider: &'a dyn WalletProvider,
    address: Address,
    from: Address,
}

impl<'a> TokenWriter<'a> {
    pub fn new(provider: &'a dyn WalletProvider, address: Address, from: Address) -> Self {
        Self {
            provider,
            address,
            from,
        }
    }

    async fn send(
        &self,
        signature: &str,
        args: &[Token],
        value: U256,
    ) -> Result<PendingTransaction<'a>, ChainError> {
        let request = TransactionRequest {
            from: self.from,
            to: self.address,
            value,
            data: abi::encode_call(signature, args),
        };
        let hash = self.provider.send_transaction(request).await?;
        Ok(PendingTransaction {
            provider: self.provider,
            hash,
        })
    }

    /// Mint `amount` whole tokens, paying `value` wei.
    pub async fn mint(
        &self,
        amount: u64,
        value: U256,
    ) -> Result<PendingTransaction<'a>, ChainError> {
        self.send(signatures::MINT, &[Token::Uint(U256::from(amount))], value)
            .await
    }

    /// Claim tokens for every unclaimed NFT the sender holds.
    pub async fn claim(&self) -> Result<PendingTransaction<'a>, ChainError> {
        self.send(signatures::CLAIM, &[], U256::zero()).await
    }

    /// Move the sale proceeds to the contract owner.
    pub async fn withdraw(&self) -> Result<PendingTransaction<'a>, ChainError> {
        self.send(signatures::WITHDRAW, &[], U256::zero()).await
    }
}

/// A broadcast transaction that may not be mined yet.
pub struct PendingTransaction<'a> {
    provider: &'a dyn WalletProvider,
    hash: TxHash,
}

impl PendingTransaction<'_> {
    pub fn hash(&self) -> TxHash {
        self.hash
    }

    /// Wait for one confirmation, polling every `poll_interval`.
    ///
    /// There is no deadline: a transaction that never gets mined keeps the
    /// caller waiting.
    pub async fn wait(self, poll_interval: Duration) -> Result<TransactionReceipt, ChainError> {
        loop {
            if let Some(receipt) = self.provider.transaction_receipt(self.hash).await? {
                if receipt.is_mined() {
                    if receipt.is_reverted() {
                        return Err(ChainError::Reverted(self.hash));
                    }
                    return Ok(receipt);
                }
            }
            tokio::time::sleep(poll_interval).await;
        }
    }
}
