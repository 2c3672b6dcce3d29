//! Ethereum address validation functions.

/// Check if a given string is a valid Ethereum address.
pub fn is_valid_eth_address(address: &str) -> bool {
    // Must be 42 characters: "0x" + 40 hex digits
    if address.len() != 42 {
        return false;
    }

    // Must start with "0x" or "0X"
    if !address.starts_with("0x") && !address.starts_with("0X") {
        return false;
    }

    // Check that the remaining 40 characters are all valid hex digits
    address[2..].chars().all(|c| c.is_ascii_hexdigit())
}
