//! Claimable balance: owned NFTs whose reward tokens are still unclaimed.

use crate::chain::{ChainError, NftContract, TokenContract};
use crate::wallet::Address;
use primitive_types::U256;

/// Count the NFTs held by `owner` that have not been claimed against yet.
///
/// Walks the holdings by ordinal index, one identifier lookup and one
/// claimed-flag lookup per NFT, strictly in order: `1 + 2n` queries for `n`
/// NFTs, a single query when none are held.
pub async fn claimable_balance(
    nft: &NftContract<'_>,
    token: &TokenContract<'_>,
    owner: Address,
) -> Result<u64, ChainError> {
    let owned = nft.balance_of(owner).await?;
    if owned.is_zero() {
        return Ok(0);
    }

    let mut unclaimed = 0u64;
    let mut index = U256::zero();
    while index < owned {
        let token_id = nft.token_of_owner_by_index(owner, index).await?;
        if !token.token_ids_claimed(token_id).await? {
            unclaimed += 1;
        }
        index += U256::one();
    }
    Ok(unclaimed)
}
