//! Fixed-point rendering of quote figures.

use rust_decimal::{Decimal, RoundingStrategy};

/// Placeholder for absent figures
pub const NOT_AVAILABLE: &str = "N/A";

fn fixed(value: Decimal, dp: u32) -> String {
    let mut rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointNearestEven);
    rounded.rescale(dp);
    rounded.to_string()
}

/// `1234.5` → `$1234.50`
pub fn format_usd(value: Decimal) -> String {
    format!("${}", fixed(value, 2))
}

/// `1234567.4` → `$1,234,567`
pub fn format_usd_whole(value: Decimal) -> String {
    let digits = fixed(value, 0);
    let (sign, digits) = digits
        .strip_prefix('-')
        .map_or(("", digits.as_str()), |rest| ("-", rest));

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("${sign}{grouped}")
}

/// `-1.234` → `-1.23%`
pub fn format_percent(value: Decimal) -> String {
    format!("{}%", fixed(value, 2))
}

/// Apply `f` to a present value, else `N/A`
pub fn or_na(value: Option<Decimal>, f: fn(Decimal) -> String) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(dec!(1234.5)), "$1234.50");
        assert_eq!(format_usd(dec!(97500)), "$97500.00");
        assert_eq!(format_usd(dec!(0.000022)), "$0.00");
        assert_eq!(format_usd(dec!(2.345)), "$2.34");
    }

    #[test]
    fn test_format_usd_whole() {
        assert_eq!(format_usd_whole(dec!(1234567)), "$1,234,567");
        assert_eq!(format_usd_whole(dec!(1265727364000.5)), "$1,265,727,364,000");
        assert_eq!(format_usd_whole(dec!(999)), "$999");
        assert_eq!(format_usd_whole(dec!(1000)), "$1,000");
        assert_eq!(format_usd_whole(dec!(-1234.6)), "$-1,235");
        assert_eq!(format_usd_whole(Decimal::ZERO), "$0");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(dec!(-1.234)), "-1.23%");
        assert_eq!(format_percent(dec!(12)), "12.00%");
    }

    #[test]
    fn test_absent_values() {
        assert_eq!(or_na(None, format_usd), "N/A");
        assert_eq!(or_na(Some(dec!(1)), format_usd), "$1.00");
    }
}
