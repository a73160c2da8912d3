//! Base-unit scaling between human-entered decimal amounts and on-chain
//! fixed-point integers.
//!
//! Amounts cross the chain boundary as integers scaled by 10^18. Parsing is
//! truncation-safe: malformed or empty input maps to zero, never an error.

/// Fractional decimal digits of the staked token's base-unit representation.
pub const TOKEN_DECIMALS: u32 = 18;

/// Parse a human-entered decimal amount into base units.
///
/// Accepts digits with at most one `.`; fractional digits beyond `decimals`
/// are truncated. Empty, malformed, or overflowing input returns exactly 0.
pub fn parse_units(input: &str, decimals: u32) -> u128 {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return 0;
    }

    let (whole, frac) = match trimmed.split_once('.') {
        Some((w, f)) => (w, f),
        None => (trimmed, ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return 0;
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return 0;
    }

    let scale = 10u128.pow(decimals);
    let whole_units = if whole.is_empty() {
        Some(0)
    } else {
        whole.parse::<u128>().ok()
    };

    // Keep only the representable fractional digits, scaling what remains up
    // to the full precision.
    let kept = &frac[..frac.len().min(decimals as usize)];
    let frac_units = if kept.is_empty() {
        Some(0)
    } else {
        kept.parse::<u128>()
            .ok()
            .and_then(|f| f.checked_mul(10u128.pow(decimals - kept.len() as u32)))
    };

    match (whole_units, frac_units) {
        (Some(w), Some(f)) => w.checked_mul(scale).and_then(|v| v.checked_add(f)).unwrap_or(0),
        _ => 0,
    }
}

/// Convert a base-unit integer back to a display decimal.
pub fn format_units(raw: u128, decimals: u32) -> f64 {
    raw as f64 / 10f64.powi(decimals as i32)
}

/// Divide a raw on-chain value by 10^decimals for display.
///
/// `None` in means "no value yet"; a non-finite conversion also fails soft.
pub fn to_decimal(raw: Option<u128>, decimals: u32) -> Option<f64> {
    let value = format_units(raw?, decimals);
    value.is_finite().then_some(value)
}

/// Pass-through conversion for non-scaled counters (user counts etc.).
pub fn to_integer(raw: Option<u128>) -> Option<u64> {
    raw.and_then(|v| u64::try_from(v).ok())
}

/// Parse a lock-extension day count; malformed input coerces to 1.
pub fn parse_days(input: &str) -> u64 {
    input.trim().parse().unwrap_or(1)
}

/// Parse a deposit index; malformed input coerces to 0.
pub fn parse_index(input: &str) -> u64 {
    input.trim().parse().unwrap_or(0)
}

/// Format a display number with at most `max_frac` fractional digits,
/// trimming trailing zeros.
pub fn format_max_frac(value: f64, max_frac: usize) -> String {
    let s = format!("{value:.max_frac$}");
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const WEI: u128 = 1_000_000_000_000_000_000;

    #[test]
    fn test_parse_units_whole() {
        assert_eq!(parse_units("1", 18), WEI);
        assert_eq!(parse_units("250", 18), 250 * WEI);
        assert_eq!(parse_units(" 7 ", 18), 7 * WEI);
    }

    #[test]
    fn test_parse_units_fractional() {
        assert_eq!(parse_units("1.5", 18), WEI + WEI / 2);
        assert_eq!(parse_units("0.000000000000000001", 18), 1);
        assert_eq!(parse_units(".5", 18), WEI / 2);
        assert_eq!(parse_units("2.", 18), 2 * WEI);
    }

    #[test]
    fn test_parse_units_truncates_excess_precision() {
        // 19th fractional digit is dropped, not rounded
        assert_eq!(parse_units("0.0000000000000000019", 18), 1);
    }

    #[test]
    fn test_parse_units_malformed_is_zero() {
        assert_eq!(parse_units("", 18), 0);
        assert_eq!(parse_units("   ", 18), 0);
        assert_eq!(parse_units("abc", 18), 0);
        assert_eq!(parse_units("1.2.3", 18), 0);
        assert_eq!(parse_units("-5", 18), 0);
        assert_eq!(parse_units("1e18", 18), 0);
        assert_eq!(parse_units(".", 18), 0);
    }

    #[test]
    fn test_parse_units_overflow_is_zero() {
        // u128::MAX has 39 digits; anything that cannot scale maps to zero
        let huge = "9".repeat(40);
        assert_eq!(parse_units(&huge, 18), 0);
    }

    #[test]
    fn test_to_decimal() {
        assert_eq!(to_decimal(None, 18), None);
        assert_eq!(to_decimal(Some(WEI), 18), Some(1.0));
        assert_eq!(to_decimal(Some(WEI / 2), 18), Some(0.5));
        assert_eq!(to_decimal(Some(0), 18), Some(0.0));
    }

    #[test]
    fn test_to_integer() {
        assert_eq!(to_integer(None), None);
        assert_eq!(to_integer(Some(42)), Some(42));
        assert_eq!(to_integer(Some(u128::from(u64::MAX) + 1)), None);
    }

    #[test]
    fn test_parse_days_and_index_defaults() {
        assert_eq!(parse_days("1"), 1);
        assert_eq!(parse_days("14"), 14);
        assert_eq!(parse_days(""), 1);
        assert_eq!(parse_days("abc"), 1);
        assert_eq!(parse_days("1.5"), 1);
        assert_eq!(parse_index("2"), 2);
        assert_eq!(parse_index(""), 0);
        assert_eq!(parse_index("xyz"), 0);
    }

    #[test]
    fn test_format_max_frac() {
        assert_eq!(format_max_frac(1234.5678, 3), "1234.568");
        assert_eq!(format_max_frac(2.0, 1), "2");
        assert_eq!(format_max_frac(2.5, 1), "2.5");
        assert_eq!(format_max_frac(0.0, 3), "0");
    }

    proptest! {
        /// Scaling round-trip: to_decimal(v, d) * 10^d recovers v within
        /// floating-point rounding tolerance.
        #[test]
        fn prop_to_decimal_round_trip(v in 0u128..=u128::from(u64::MAX), d in 0u32..=18) {
            let dec = to_decimal(Some(v), d).unwrap();
            let back = dec * 10f64.powi(d as i32);
            let expected = v as f64;
            let tolerance = (expected.abs() * 1e-9).max(1e-9);
            prop_assert!((back - expected).abs() <= tolerance);
        }

        /// Parsing never panics and never produces a value for garbage input.
        #[test]
        fn prop_parse_units_no_panic(s in "\\PC*") {
            let _ = parse_units(&s, 18);
        }
    }
}
