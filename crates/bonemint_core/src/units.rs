//! Exact conversion between wei-denominated integers and decimal strings.
//!
//! All financial math in the workspace is integer-only; these helpers exist
//! solely at the display/input boundary.

use alloy_primitives::U256;
use anyhow::Result;

/// `10^decimals` as a `U256`.
fn scale(decimals: u8) -> U256 {
    U256::from(10u64).pow(U256::from(decimals))
}

/// Format a wei amount as a decimal string, trimming trailing zeros.
///
/// `format_units(U256::from(100_000_000_000_000_000u64), 18)` is `"0.1"`.
pub fn format_units(value: U256, decimals: u8) -> String {
    if decimals == 0 {
        return value.to_string();
    }
    let scale = scale(decimals);
    let whole = value / scale;
    let frac = value % scale;

    if frac.is_zero() {
        return whole.to_string();
    }

    let frac_str = format!("{frac:0>width$}", width = decimals as usize);
    let trimmed = frac_str.trim_end_matches('0');
    format!("{whole}.{trimmed}")
}

/// Parse a decimal string into a wei amount. Exact: fractional digits beyond
/// `decimals` are rejected rather than rounded.
pub fn parse_units(input: &str, decimals: u8) -> Result<U256> {
    let input = input.trim();
    if input.is_empty() {
        anyhow::bail!("empty amount");
    }

    let (whole_str, frac_str) = match input.split_once('.') {
        Some((w, f)) => (w, f),
        None => (input, ""),
    };

    if !whole_str.chars().all(|c| c.is_ascii_digit())
        || !frac_str.chars().all(|c| c.is_ascii_digit())
        || (whole_str.is_empty() && frac_str.is_empty())
    {
        anyhow::bail!("invalid amount: {input}");
    }
    if frac_str.len() > decimals as usize {
        anyhow::bail!(
            "too many decimal places: {} (max {decimals})",
            frac_str.len()
        );
    }

    let whole: U256 = if whole_str.is_empty() {
        U256::ZERO
    } else {
        whole_str.parse()?
    };
    let frac: U256 = if frac_str.is_empty() {
        U256::ZERO
    } else {
        frac_str.parse()?
    };

    let frac_scale = scale(decimals - frac_str.len() as u8);
    let scaled_whole = whole
        .checked_mul(scale(decimals))
        .ok_or_else(|| anyhow::anyhow!("amount overflows 256 bits"))?;
    scaled_whole
        .checked_add(frac * frac_scale)
        .ok_or_else(|| anyhow::anyhow!("amount overflows 256 bits"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_one_tenth_bone() {
        let wei = U256::from(100_000_000_000_000_000u64);
        assert_eq!(format_units(wei, 18), "0.1");
    }

    #[test]
    fn format_whole_amount() {
        let wei = U256::from(10u64).pow(U256::from(18)) * U256::from(42);
        assert_eq!(format_units(wei, 18), "42");
    }

    #[test]
    fn format_zero() {
        assert_eq!(format_units(U256::ZERO, 18), "0");
    }

    #[test]
    fn format_small_fraction_keeps_leading_zeros() {
        // 1 wei
        assert_eq!(format_units(U256::from(1u64), 18), "0.000000000000000001");
    }

    #[test]
    fn format_zero_decimals_is_plain_integer() {
        assert_eq!(format_units(U256::from(1234u64), 0), "1234");
    }

    #[test]
    fn parse_one_tenth() {
        let wei = parse_units("0.1", 18).unwrap();
        assert_eq!(wei, U256::from(100_000_000_000_000_000u64));
    }

    #[test]
    fn parse_whole() {
        let wei = parse_units("3", 18).unwrap();
        assert_eq!(wei, U256::from(10u64).pow(U256::from(18)) * U256::from(3));
    }

    #[test]
    fn parse_format_round_trip() {
        for s in ["0.1", "1", "12.345", "0.000000000000000001"] {
            let wei = parse_units(s, 18).unwrap();
            assert_eq!(format_units(wei, 18), *s);
        }
    }

    #[test]
    fn parse_rejects_excess_precision() {
        assert!(parse_units("0.1234567890123456789", 18).is_err());
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(parse_units("", 18).is_err());
        assert!(parse_units(".", 18).is_err());
        assert!(parse_units("abc", 18).is_err());
        assert!(parse_units("-1", 18).is_err());
        assert!(parse_units("1.2.3", 18).is_err());
    }

    #[test]
    fn price_times_three_has_no_rounding_loss() {
        // 0.1 BONE * 3 = exactly 0.3 BONE in wei.
        let price = parse_units("0.1", 18).unwrap();
        let total = price * U256::from(3);
        assert_eq!(total, U256::from(300_000_000_000_000_000u64));
        assert_eq!(format_units(total, 18), "0.3");
    }
}
