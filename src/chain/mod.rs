pub mod abi;
pub mod contracts;
pub mod error;

pub use contracts::{NftContract, PendingTransaction, TokenContract, TokenWriter};
pub use error::ChainError;
