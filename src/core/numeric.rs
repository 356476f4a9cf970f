//! Locale-tolerant number parsing.
//!
//! Invoices mix US (`1,234.56`) and European (`1.234,56`) conventions. The
//! rules here decide which of `.` and `,` is the decimal separator and strip
//! the other as a thousands separator.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;

use super::types::value_text;

/// Parse a textual quantity into a [`Decimal`].
///
/// - both `.` and `,` present: whichever appears last is the decimal separator
/// - only `,`: a single comma followed by at most two characters is decimal,
///   otherwise every comma is a thousands separator
/// - only `.`: plain decimal literal
/// - neither: must be an integer (`-?digits`)
///
/// Returns `None` for anything else, including blank input.
pub fn parse_numeric(input: &str) -> Option<Decimal> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }

    let has_dot = s.contains('.');
    let has_comma = s.contains(',');

    match (has_dot, has_comma) {
        (true, true) => {
            let last_dot = s.rfind('.')?;
            let last_comma = s.rfind(',')?;
            let cleaned = if last_comma > last_dot {
                s.replace('.', "").replace(',', ".")
            } else {
                s.replace(',', "")
            };
            parse_literal(&cleaned)
        }
        (false, true) => {
            let parts: Vec<&str> = s.split(',').collect();
            let cleaned = match parts.as_slice() {
                [_, frac] if frac.chars().count() <= 2 => s.replace(',', "."),
                _ => s.replace(',', ""),
            };
            parse_literal(&cleaned)
        }
        (true, false) => parse_literal(s),
        (false, false) => {
            let digits = s.strip_prefix('-').unwrap_or(s);
            if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
                Decimal::from_str(s).ok()
            } else {
                None
            }
        }
    }
}

/// Parse a raw field value: strings go through [`parse_numeric`], JSON
/// numbers through their textual form, anything else fails.
pub fn parse_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::String(s) => parse_numeric(s),
        Value::Number(_) => parse_numeric(&value_text(value)),
        _ => None,
    }
}

/// Round to `dp` decimal places, exact halves to the even neighbour.
pub fn round_half_even(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointNearestEven)
}

/// Format a value with exactly two decimals (`50` -> `50.00`).
pub fn format_amount(value: Decimal) -> String {
    let mut rounded = round_half_even(value, 2);
    rounded.rescale(2);
    rounded.to_string()
}

/// Parse a plain decimal literal once separators are normalized.
///
/// Grammar: `[+-]? digits? ('.' digits?)? ([eE] [+-]? digits)?` with at least
/// one mantissa digit.
fn parse_literal(s: &str) -> Option<Decimal> {
    let (negative, unsigned) = match s.as_bytes().first()? {
        b'-' => (true, &s[1..]),
        b'+' => (false, &s[1..]),
        _ => (false, s),
    };

    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(pos) => (&unsigned[..pos], Some(&unsigned[pos + 1..])),
        None => (unsigned, None),
    };

    let (int_part, frac_part) = match mantissa.split_once('.') {
        Some((i, f)) => (i, f),
        None => (mantissa, ""),
    };
    let all_digits = |p: &str| p.chars().all(|c| c.is_ascii_digit());
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !all_digits(int_part) || !all_digits(frac_part) {
        return None;
    }

    let int_part = if int_part.is_empty() { "0" } else { int_part };
    let normalized = if frac_part.is_empty() {
        int_part.to_string()
    } else {
        format!("{int_part}.{frac_part}")
    };

    let value = match exponent {
        None => Decimal::from_str(&normalized).ok()?,
        Some(exp) => {
            let digits = exp.strip_prefix(['+', '-']).unwrap_or(exp);
            if digits.is_empty() || !all_digits(digits) {
                return None;
            }
            let exp: i64 = exp.parse().ok()?;
            scale_by_power_of_ten(Decimal::from_str(&normalized).ok()?, exp)?
        }
    };

    Some(if negative { -value } else { value })
}

fn scale_by_power_of_ten(mut value: Decimal, exp: i64) -> Option<Decimal> {
    if value.is_zero() {
        return Some(value);
    }
    let ten = Decimal::TEN;
    if exp >= 0 {
        for _ in 0..exp {
            value = value.checked_mul(ten)?;
        }
    } else {
        // Beyond 28 places everything underflows to zero or loses the value.
        if exp < -28 {
            return None;
        }
        for _ in 0..(-exp) {
            value = value.checked_div(ten)?;
        }
    }
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn european_thousands_and_decimal_comma() {
        assert_eq!(parse_numeric("1.234,56"), Some(dec!(1234.56)));
        assert_eq!(parse_numeric("1.234.567,8"), Some(dec!(1234567.8)));
    }

    #[test]
    fn us_thousands_and_decimal_dot() {
        assert_eq!(parse_numeric("1,234.56"), Some(dec!(1234.56)));
        assert_eq!(parse_numeric("1,234,567.89"), Some(dec!(1234567.89)));
    }

    #[test]
    fn comma_only() {
        assert_eq!(parse_numeric("123,45"), Some(dec!(123.45)));
        assert_eq!(parse_numeric("123,4"), Some(dec!(123.4)));
        assert_eq!(parse_numeric("1,234"), Some(dec!(1234)));
        assert_eq!(parse_numeric("1,234,567"), Some(dec!(1234567)));
        assert_eq!(parse_numeric("1,2,3"), Some(dec!(123)));
        assert_eq!(parse_numeric("123,"), Some(dec!(123)));
        assert_eq!(parse_numeric(","), None);
    }

    #[test]
    fn dot_only() {
        assert_eq!(parse_numeric("12345.67"), Some(dec!(12345.67)));
        assert_eq!(parse_numeric("-0.5"), Some(dec!(-0.5)));
        assert_eq!(parse_numeric(".5"), Some(dec!(0.5)));
        assert_eq!(parse_numeric("5."), Some(dec!(5)));
        assert_eq!(parse_numeric("1.5e3"), Some(dec!(1500)));
        assert_eq!(parse_numeric("1.2.3"), None);
        assert_eq!(parse_numeric("."), None);
    }

    #[test]
    fn integers_only() {
        assert_eq!(parse_numeric("42"), Some(dec!(42)));
        assert_eq!(parse_numeric("  -7 "), Some(dec!(-7)));
        assert_eq!(parse_numeric("+7"), None);
        assert_eq!(parse_numeric("1e5"), None);
        assert_eq!(parse_numeric("12 34"), None);
    }

    #[test]
    fn garbage_fails_silently() {
        assert_eq!(parse_numeric(""), None);
        assert_eq!(parse_numeric("   "), None);
        assert_eq!(parse_numeric("abc"), None);
        assert_eq!(parse_numeric("USD 12.50"), None);
        assert_eq!(parse_numeric("inf."), None);
    }

    #[test]
    fn json_values() {
        assert_eq!(parse_value(&json!(10)), Some(dec!(10)));
        assert_eq!(parse_value(&json!(5.25)), Some(dec!(5.25)));
        assert_eq!(parse_value(&json!("1.234,5")), Some(dec!(1234.5)));
        assert_eq!(parse_value(&json!(true)), None);
        assert_eq!(parse_value(&Value::Null), None);
    }

    #[test]
    fn rounding_and_formatting() {
        assert_eq!(round_half_even(dec!(2.345), 2), dec!(2.34));
        assert_eq!(round_half_even(dec!(2.355), 2), dec!(2.36));
        assert_eq!(round_half_even(dec!(-0.125), 2), dec!(-0.12));
        assert_eq!(round_half_even(dec!(2.3451), 2), dec!(2.35));
        assert_eq!(format_amount(dec!(50)), "50.00");
        assert_eq!(format_amount(dec!(33.3333)), "33.33");
    }
}
