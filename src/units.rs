//! Conversion between whole-unit decimal strings and 18-decimal base units.
//!
//! Follows ethers' `parseEther` / `formatEther` conventions so the amounts
//! shown here match what a browser dApp would show for the same contract.

use crate::consts::cli_consts::sale::{DECIMALS, PRICE_PER_TOKEN_WEI};
use primitive_types::U256;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UnitsError {
    #[error("'{0}' is not a decimal number")]
    InvalidNumber(String),

    #[error("'{0}' has more than {max} fractional digits", max = DECIMALS)]
    TooPrecise(String),

    #[error("'{0}' does not fit in 256 bits")]
    Overflow(String),
}

fn one_unit() -> U256 {
    U256::exp10(DECIMALS)
}

/// Parse a decimal ether string ("0.005", "12", "1.") into wei.
pub fn parse_ether(value: &str) -> Result<U256, UnitsError> {
    let trimmed = value.trim();
    let (whole, fraction) = match trimmed.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (trimmed, ""),
    };

    let is_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !is_digits(whole) || !is_digits(fraction) {
        return Err(UnitsError::InvalidNumber(value.to_string()));
    }
    if fraction.len() > DECIMALS {
        return Err(UnitsError::TooPrecise(value.to_string()));
    }

    let overflow = || UnitsError::Overflow(value.to_string());
    let whole = if whole.is_empty() {
        U256::zero()
    } else {
        U256::from_dec_str(whole).map_err(|_| overflow())?
    };
    let fraction = if fraction.is_empty() {
        U256::zero()
    } else {
        let padded = format!("{:0<width$}", fraction, width = DECIMALS);
        U256::from_dec_str(&padded).map_err(|_| overflow())?
    };

    whole
        .checked_mul(one_unit())
        .and_then(|wei| wei.checked_add(fraction))
        .ok_or_else(overflow)
}

/// Format wei as a decimal ether string. Always keeps at least one
/// fractional digit: zero is "0.0", five ether is "5.0".
pub fn format_ether(wei: U256) -> String {
    let (whole, fraction) = wei.div_mod(one_unit());
    let fraction = format!("{:0>width$}", fraction.to_string(), width = DECIMALS);
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        format!("{}.0", whole)
    } else {
        format!("{}.{}", whole, fraction)
    }
}

/// Payment owed for minting `amount` tokens, in wei.
pub fn mint_price(amount: u64) -> U256 {
    U256::from(PRICE_PER_TOKEN_WEI) * U256::from(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_whole_and_fractional_amounts() {
        assert_eq!(parse_ether("1").unwrap(), U256::exp10(18));
        assert_eq!(parse_ether("0.001").unwrap(), U256::exp10(15));
        assert_eq!(parse_ether(".5").unwrap(), U256::exp10(17) * 5);
        assert_eq!(parse_ether("2.").unwrap(), U256::exp10(18) * 2);
    }

    #[test]
    fn rejects_malformed_amounts() {
        assert!(matches!(parse_ether(""), Err(UnitsError::InvalidNumber(_))));
        assert!(matches!(parse_ether("."), Err(UnitsError::InvalidNumber(_))));
        assert!(matches!(parse_ether("-1"), Err(UnitsError::InvalidNumber(_))));
        assert!(matches!(parse_ether("1.2.3"), Err(UnitsError::InvalidNumber(_))));
        assert!(matches!(
            parse_ether("0.0000000000000000001"),
            Err(UnitsError::TooPrecise(_))
        ));
    }

    #[test]
    fn formats_like_ethers() {
        assert_eq!(format_ether(U256::zero()), "0.0");
        assert_eq!(format_ether(U256::exp10(18) * 5), "5.0");
        assert_eq!(format_ether(U256::exp10(15) * 5), "0.005");
        assert_eq!(format_ether(U256::exp10(18) + U256::exp10(17) * 25 / 10), "1.25");
        assert_eq!(format_ether(U256::one()), "0.000000000000000001");
    }

    #[test]
    /// Five tokens at 0.001 ether each costs exactly 0.005 ether.
    fn mint_price_for_five_tokens() {
        assert_eq!(mint_price(5), parse_ether("0.005").unwrap());
        assert_eq!(mint_price(5), U256::from(5_000_000_000_000_000u64));
    }

    #[test]
    fn mint_price_is_exact_for_large_amounts() {
        assert_eq!(mint_price(10_000), parse_ether("10").unwrap());
    }
}
