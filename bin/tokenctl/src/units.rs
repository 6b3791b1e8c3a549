//! Display-unit conversion.
//!
//! The token client only takes smallest units; conversion to and from
//! human-readable amounts happens here, at the edge.

use alloy_primitives::{
    utils::{format_units, parse_units},
    U256,
};

/// Parse a user-supplied amount.
///
/// With `decimals`, the input is in display units ("1.5"); without, it is a
/// smallest-unit integer.
pub fn parse_amount(input: &str, decimals: Option<u8>) -> eyre::Result<U256> {
    let Some(decimals) = decimals else {
        return Ok(token::parse_amount(input)?);
    };

    let trimmed = input.trim();
    if trimmed.starts_with('-') {
        eyre::bail!("Amount must not be negative: {input:?}");
    }
    Ok(parse_units(trimmed, decimals)?.get_absolute())
}

/// Render an amount for display.
pub fn format_amount(amount: U256, decimals: Option<u8>) -> String {
    match decimals {
        Some(decimals) => format_units(amount, decimals).unwrap_or_else(|_| amount.to_string()),
        None => amount.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_amounts() {
        assert_eq!(parse_amount("1000", None).unwrap(), U256::from(1000));
        assert!(parse_amount("1.5", None).is_err());
        assert_eq!(format_amount(U256::from(1000), None), "1000");
    }

    #[test]
    fn test_display_amounts() {
        assert_eq!(
            parse_amount("1.5", Some(18)).unwrap(),
            U256::from(1_500_000_000_000_000_000u128)
        );
        assert_eq!(parse_amount("2", Some(6)).unwrap(), U256::from(2_000_000));
        assert!(parse_amount("-1", Some(18)).is_err());
    }

    #[test]
    fn test_format_whole_token() {
        let formatted = format_amount(U256::from(1_000_000u64), Some(6));
        assert!(formatted.starts_with("1."));
    }
}
