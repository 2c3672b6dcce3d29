//! Minimal Solidity ABI encoding for the sale contracts.
//!
//! Only static types are needed: every argument and return value is a single
//! 32-byte word.

use crate::wallet::Address;
use primitive_types::U256;
use sha3::{Digest, Keccak256};
use thiserror::Error;

const WORD: usize = 32;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AbiError {
    #[error("Return data too short: expected {expected} bytes, got {actual}")]
    ShortData { expected: usize, actual: usize },

    #[error("Invalid {kind} encoding in return data")]
    InvalidValue { kind: &'static str },
}

/// A single static ABI argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Address(Address),
    Uint(U256),
}

impl Token {
    fn encode_into(&self, out: &mut Vec<u8>) {
        let mut word = [0u8; WORD];
        match self {
            Token::Address(address) => word[WORD - 20..].copy_from_slice(address.as_bytes()),
            Token::Uint(value) => value.to_big_endian(&mut word),
        }
        out.extend_from_slice(&word);
    }
}

/// The 4-byte function selector: the first bytes of keccak256 of the signature.
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = Keccak256::digest(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

/// Encode calldata for `signature` with the given arguments.
pub fn encode_call(signature: &str, args: &[Token]) -> Vec<u8> {
    let mut data = Vec::with_capacity(4 + WORD * args.len());
    data.extend_from_slice(&selector(signature));
    for arg in args {
        arg.encode_into(&mut data);
    }
    data
}

fn first_word(data: &[u8]) -> Result<&[u8], AbiError> {
    data.get(..WORD).ok_or(AbiError::ShortData {
        expected: WORD,
        actual: data.len(),
    })
}

pub fn decode_uint(data: &[u8]) -> Result<U256, AbiError> {
    Ok(U256::from_big_endian(first_word(data)?))
}

pub fn decode_bool(data: &[u8]) -> Result<bool, AbiError> {
    let word = first_word(data)?;
    if word[..WORD - 1].iter().any(|b| *b != 0) || word[WORD - 1] > 1 {
        return Err(AbiError::InvalidValue { kind: "bool" });
    }
    Ok(word[WORD - 1] == 1)
}

pub fn decode_address(data: &[u8]) -> Result<Address, AbiError> {
    let word = first_word(data)?;
    if word[..WORD - 20].iter().any(|b| *b != 0) {
        return Err(AbiError::InvalidValue { kind: "address" });
    }
    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&word[WORD - 20..]);
    Ok(Address::from_bytes(bytes))
}

/// Encode a value as one ABI word, as a node returns it.
#[cfg(test)]
pub fn encode_word(token: Token) -> Vec<u8> {
    let mut out = Vec::with_capacity(WORD);
    token.encode_into(&mut out);
    out
}
