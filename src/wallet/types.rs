//! Chain primitives exchanged with the wallet.

use crate::keys::is_valid_eth_address;
use crate::wallet::error::WalletError;
use primitive_types::U256;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// A 20-byte account or contract address.
///
/// Stored as raw bytes, so two addresses compare equal whatever letter case
/// they were written in.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Address([u8; 20]);

impl Address {
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl FromStr for Address {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !is_valid_eth_address(s) {
            return Err(format!(
                "Invalid Ethereum address: {}. It should be a 42-character hex string starting with '0x'.",
                s
            ));
        }
        let mut bytes = [0u8; 20];
        hex::decode_to_slice(&s[2..], &mut bytes).map_err(|e| e.to_string())?;
        Ok(Self(bytes))
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl Debug for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Address({})", self)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A 32-byte transaction hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TxHash([u8; 32]);

impl TxHash {
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl FromStr for TxHash {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = parse_data(s)?;
        let bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|_| WalletError::Malformed(format!("transaction hash {}", s)))?;
        Ok(Self(bytes))
    }
}

impl Display for TxHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl Debug for TxHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "TxHash({})", self)
    }
}

/// A read-only contract call (`eth_call`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRequest {
    pub to: Address,
    pub data: Vec<u8>,
}

/// A transaction for the wallet to sign and broadcast (`eth_sendTransaction`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRequest {
    pub from: Address,
    pub to: Address,
    pub value: U256,
    pub data: Vec<u8>,
}

/// The parts of a mined transaction's receipt the dashboard looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionReceipt {
    pub transaction_hash: TxHash,
    pub block_number: Option<u64>,
    /// 1 for success, 0 for revert. Absent on pre-Byzantium chains.
    pub status: Option<u64>,
}

impl TransactionReceipt {
    pub fn is_mined(&self) -> bool {
        self.block_number.is_some()
    }

    pub fn is_reverted(&self) -> bool {
        self.status == Some(0)
    }
}

/// Parse a JSON-RPC quantity ("0x1a") into a u64.
pub fn parse_quantity(s: &str) -> Result<u64, WalletError> {
    let digits = strip_hex_prefix(s)?;
    if digits.is_empty() {
        return Err(WalletError::Malformed(format!("empty quantity {}", s)));
    }
    u64::from_str_radix(digits, 16).map_err(|e| WalletError::Malformed(format!("{}: {}", s, e)))
}

/// Format a 256-bit value as a JSON-RPC quantity.
pub fn format_quantity(value: U256) -> String {
    format!("0x{:x}", value)
}

/// Parse JSON-RPC data ("0xdeadbeef") into bytes.
pub fn parse_data(s: &str) -> Result<Vec<u8>, WalletError> {
    let digits = strip_hex_prefix(s)?;
    hex::decode(digits).map_err(|e| WalletError::Malformed(format!("{}: {}", s, e)))
}

pub fn format_data(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

fn strip_hex_prefix(s: &str) -> Result<&str, WalletError> {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .ok_or_else(|| WalletError::Malformed(format!("missing 0x prefix: {}", s)))
}
