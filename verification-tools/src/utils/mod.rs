// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! General purpose utilities.

use alloy::primitives::{utils::format_units, U256};

use color::Color;

pub mod color;
pub mod sys;

#[cfg(feature = "integration-tests")]
pub mod testing;

#[derive(Debug, thiserror::Error)]
pub enum FeeError {
    #[error("invalid gwei value: {0}")]
    Invalid(String),
    #[error("gwei value must be non-negative")]
    Negative,
    #[error("gwei value out of range")]
    OutOfRange,
}

/// Converts a decimal gwei amount to wei.
pub fn parse_gwei(fee_str: &str) -> Result<u128, FeeError> {
    let gwei = match fee_str.trim().parse::<f64>() {
        Ok(fee) if fee >= 0.0 => fee,
        Ok(_) => return Err(FeeError::Negative),
        Err(_) => return Err(FeeError::Invalid(fee_str.to_string())),
    };
    if !gwei.is_finite() {
        return Err(FeeError::OutOfRange);
    }

    let wei = gwei * 1e9;
    if !wei.is_finite() || wei >= u128::MAX as f64 {
        return Err(FeeError::OutOfRange);
    }
    Ok(wei as u128)
}

/// Pretty-prints a wei amount as ETH, colored by magnitude.
pub fn format_eth(wei: U256) -> String {
    let Ok(text) = format_units(wei, "ether") else {
        return "???".red();
    };
    let text = format!("{text} ETH");
    if wei <= U256::from(10u64).pow(U256::from(15)) {
        text.mint()
    } else if wei <= U256::from(10u64).pow(U256::from(16)) {
        text.yellow()
    } else {
        text.red()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use color::strip_color;

    #[test]
    fn gwei_to_wei() {
        assert_eq!(parse_gwei("1").unwrap(), 1_000_000_000);
        assert_eq!(parse_gwei(" 0.5 ").unwrap(), 500_000_000);
        assert_eq!(parse_gwei("0").unwrap(), 0);
    }

    #[test]
    fn rejects_bad_gwei() {
        assert!(matches!(parse_gwei("-1"), Err(FeeError::Negative)));
        assert!(matches!(parse_gwei("ten"), Err(FeeError::Invalid(_))));
        assert!(matches!(parse_gwei("inf"), Err(FeeError::OutOfRange)));
        assert!(matches!(parse_gwei("1e40"), Err(FeeError::OutOfRange)));
    }

    #[test]
    fn formats_eth() {
        let one_gwei = U256::from(1_000_000_000u64);
        assert_eq!(strip_color(format_eth(one_gwei)), "0.000000001000000000 ETH");
    }
}
