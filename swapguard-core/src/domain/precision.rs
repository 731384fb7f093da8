//! Precision-safe amount validation
//!
//! Amounts typed into a swap form are compared against the available balance
//! as fixed-point integers, so binary floating point never decides whether a
//! user can spend an amount. All functions here are pure and reentrant.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::iter;

use log::warn;
use serde::{Deserialize, Serialize};

use super::result::{Error, Result};

/// Fractional digits used when a token's decimals are unknown
pub const DEFAULT_DECIMALS: u32 = 18;

/// Absolute difference under which the numeric fallback treats two amounts as equal
pub const TOLERANCE: f64 = 1e-10;

/// Most fractional digits a 128-bit fixed-point magnitude can carry
pub const MAX_PRECISION: u32 = 38;

/// Balances at or above this are rendered without a fractional part
pub const LARGE_BALANCE_THRESHOLD: f64 = 1e15;

/// Balances below this keep their full string form
pub const SMALL_BALANCE_THRESHOLD: f64 = 1e-6;

/// An amount as it reaches the validator: typed text or a number from a feed
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AmountInput<'a> {
    Text(&'a str),
    Number(f64),
}

impl<'a> From<&'a str> for AmountInput<'a> {
    fn from(text: &'a str) -> Self {
        AmountInput::Text(text)
    }
}

impl<'a> From<&'a String> for AmountInput<'a> {
    fn from(text: &'a String) -> Self {
        AmountInput::Text(text.as_str())
    }
}

impl From<f64> for AmountInput<'_> {
    fn from(value: f64) -> Self {
        AmountInput::Number(value)
    }
}

impl AmountInput<'_> {
    fn as_decimal_str(&self) -> Cow<'_, str> {
        match self {
            AmountInput::Text(text) => Cow::Borrowed(*text),
            AmountInput::Number(value) => Cow::Owned(number_to_string(*value)),
        }
    }

    fn as_number(&self) -> f64 {
        match self {
            AmountInput::Text(text) => parse_number(*text),
            AmountInput::Number(value) => *value,
        }
    }
}

/// Which path decided an amount check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CheckStrategy {
    /// Fixed-point decimal comparison
    Exact,
    /// Numeric comparison with [`TOLERANCE`], used when the exact path rejected the input
    ToleranceFallback { reason: String },
}

/// Outcome of [`check_amount`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountCheck {
    pub valid: bool,
    pub strategy: CheckStrategy,
}

impl AmountCheck {
    pub fn used_fallback(&self) -> bool {
        matches!(self.strategy, CheckStrategy::ToleranceFallback { .. })
    }
}

/// Default string form of a balance: shortest round-trip digits, never exponent notation
pub fn number_to_string(value: f64) -> String {
    value.to_string()
}

/// Lenient string to number conversion
///
/// Empty or missing input is `0`. Otherwise leading whitespace is skipped and
/// the longest numeric prefix is parsed, so `"1.23e-2"` is `0.0123` and
/// `"12abc"` is `12`. Input with no numeric prefix yields `NaN`, which
/// callers must treat as an invalid amount.
pub fn parse_number<'a>(input: impl Into<Option<&'a str>>) -> f64 {
    let text = match input.into() {
        Some(text) if !text.is_empty() => text,
        _ => return 0.0,
    };

    let trimmed = text.trim_start();
    let prefix = numeric_prefix(trimmed);
    if prefix.is_empty() {
        return parse_infinity(trimmed);
    }

    prefix.parse::<f64>().unwrap_or(f64::NAN)
}

/// Longest prefix of the form `[sign] digits [. digits] [e [sign] digits]`
fn numeric_prefix(text: &str) -> &str {
    let bytes = text.as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;

    if i < bytes.len() && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        digits += j - frac_start;
        i = j;
    }

    if digits == 0 {
        return "";
    }

    // Exponent only counts when it has at least one digit
    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        let mut j = i + 1;
        if j < bytes.len() && matches!(bytes[j], b'+' | b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    &text[..i]
}

fn parse_infinity(text: &str) -> f64 {
    let (sign, rest) = match text.as_bytes().first() {
        Some(b'-') => (-1.0, &text[1..]),
        Some(b'+') => (1.0, &text[1..]),
        _ => (1.0, text),
    };
    if rest.starts_with("Infinity") {
        sign * f64::INFINITY
    } else {
        f64::NAN
    }
}

/// A decimal string scaled to a fixed number of fractional digits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ScaledDecimal {
    negative: bool,
    magnitude: u128,
}

impl ScaledDecimal {
    /// Digits past `precision` are truncated, never rounded
    fn parse(input: &str, precision: u32) -> Result<Self> {
        let text = input.trim();
        let (negative, unsigned) = match text.as_bytes().first() {
            Some(b'-') => (true, &text[1..]),
            Some(b'+') => (false, &text[1..]),
            _ => (false, text),
        };

        let (integer, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
        if fraction.contains('.') {
            return Err(Error::invalid_decimal(format!(
                "multiple decimal points in '{}'",
                input
            )));
        }
        if !integer.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(Error::invalid_decimal(format!(
                "'{}' is not a plain decimal number",
                input
            )));
        }

        let padded_fraction = fraction
            .bytes()
            .chain(iter::repeat(b'0'))
            .take(precision as usize);

        let mut magnitude: u128 = 0;
        for digit in integer.bytes().chain(padded_fraction) {
            magnitude = magnitude
                .checked_mul(10)
                .and_then(|m| m.checked_add(u128::from(digit - b'0')))
                .ok_or_else(|| {
                    Error::overflow(format!(
                        "'{}' does not fit in 128 bits at {} fractional digits",
                        input, precision
                    ))
                })?;
        }

        // -0 and 0 are the same amount
        Ok(Self {
            negative: negative && magnitude != 0,
            magnitude,
        })
    }
}

impl Ord for ScaledDecimal {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (false, false) => self.magnitude.cmp(&other.magnitude),
            (true, true) => other.magnitude.cmp(&self.magnitude),
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
        }
    }
}

impl PartialOrd for ScaledDecimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Compare two decimal strings exactly at [`DEFAULT_DECIMALS`] fractional digits
pub fn compare_decimals(a: &str, b: &str) -> Result<Ordering> {
    compare_decimals_at(a, b, DEFAULT_DECIMALS)
}

/// Compare two decimal strings exactly at `precision` fractional digits
///
/// Values that differ only past `precision` compare equal. Fails on input
/// that is not a plain decimal (exponent notation, stray characters, more
/// than one `.`), on `precision` above [`MAX_PRECISION`], or on a value that
/// overflows the 128-bit fixed-point magnitude.
pub fn compare_decimals_at(a: &str, b: &str, precision: u32) -> Result<Ordering> {
    if precision > MAX_PRECISION {
        return Err(Error::overflow(format!(
            "{} fractional digits exceed the supported {}",
            precision, MAX_PRECISION
        )));
    }
    let a = ScaledDecimal::parse(a, precision)?;
    let b = ScaledDecimal::parse(b, precision)?;
    Ok(a.cmp(&b))
}

/// Decide whether `amount` can be spent from `balance`, reporting which path decided
pub fn check_amount<'a>(
    amount: impl Into<AmountInput<'a>>,
    balance: f64,
    decimals: u32,
) -> AmountCheck {
    let amount = amount.into();
    let balance_text = number_to_string(balance);
    let precision = decimals.max(DEFAULT_DECIMALS);

    match compare_decimals_at(&amount.as_decimal_str(), &balance_text, precision) {
        Ok(ordering) => AmountCheck {
            valid: ordering != Ordering::Greater,
            strategy: CheckStrategy::Exact,
        },
        Err(e) => {
            warn!("Exact amount comparison failed, falling back to numeric: {}", e);

            let amount_num = amount.as_number();
            // NaN fails both comparisons
            let valid = (amount_num - balance).abs() < TOLERANCE || amount_num <= balance;

            AmountCheck {
                valid,
                strategy: CheckStrategy::ToleranceFallback {
                    reason: e.to_string(),
                },
            }
        }
    }
}

/// `true` iff `amount <= balance`
pub fn is_amount_valid<'a>(
    amount: impl Into<AmountInput<'a>>,
    balance: f64,
    decimals: u32,
) -> bool {
    check_amount(amount, balance, decimals).valid
}

/// String to put into the amount field when the user spends the whole balance
///
/// The result never exceeds `balance` and never carries more than `decimals`
/// fractional digits.
pub fn format_max_amount(balance: f64, decimals: u32) -> String {
    if balance >= LARGE_BALANCE_THRESHOLD {
        return number_to_string(balance.trunc());
    }

    let text = number_to_string(balance);
    if balance < SMALL_BALANCE_THRESHOLD && fraction_len(&text) <= decimals as usize {
        return text;
    }

    truncate_fraction(&text, decimals)
}

/// Exact text match against the formatted max or the raw balance string
///
/// `"123.450"` is not the max of `123.45`: this detects a MAX click, not an
/// amount that happens to be equal.
pub fn is_max_amount(amount: &str, balance: f64) -> bool {
    amount == format_max_amount(balance, DEFAULT_DECIMALS) || amount == number_to_string(balance)
}

fn fraction_len(text: &str) -> usize {
    text.split_once('.').map_or(0, |(_, fraction)| fraction.len())
}

fn truncate_fraction(text: &str, decimals: u32) -> String {
    let Some((integer, fraction)) = text.split_once('.') else {
        return text.to_string();
    };

    let kept = &fraction[..fraction.len().min(decimals as usize)];
    let kept = kept.trim_end_matches('0');

    if kept.is_empty() {
        integer.to_string()
    } else {
        format!("{}.{}", integer, kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number_empty_is_zero() {
        assert_eq!(parse_number(""), 0.0);
        let missing: Option<&str> = None;
        assert_eq!(parse_number(missing), 0.0);
    }

    #[test]
    fn test_parse_number_scientific() {
        assert_eq!(parse_number("1e3"), 1000.0);
        assert_eq!(parse_number("1.23e-2"), 0.0123);
        assert_eq!(parse_number("2E+2"), 200.0);
    }

    #[test]
    fn test_parse_number_lenient_prefix() {
        assert_eq!(parse_number("12abc"), 12.0);
        assert_eq!(parse_number("  4.5"), 4.5);
        assert_eq!(parse_number(".5"), 0.5);
        assert_eq!(parse_number("1e"), 1.0);
        assert_eq!(parse_number("-Infinity"), f64::NEG_INFINITY);
    }

    #[test]
    fn test_parse_number_garbage_is_nan() {
        assert!(parse_number("abc").is_nan());
        assert!(parse_number("-").is_nan());
        assert!(parse_number("   ").is_nan());
    }

    #[test]
    fn test_compare_equal_forms() {
        assert_eq!(compare_decimals("123", "123.0").unwrap(), Ordering::Equal);
        assert_eq!(compare_decimals("0.1", "0.10").unwrap(), Ordering::Equal);
        assert_eq!(compare_decimals("007.50", "7.5").unwrap(), Ordering::Equal);
        assert_eq!(compare_decimals(".5", "0.5").unwrap(), Ordering::Equal);
    }

    #[test]
    fn test_compare_ordering_is_antisymmetric() {
        assert_eq!(compare_decimals("1.5", "2").unwrap(), Ordering::Less);
        assert_eq!(compare_decimals("2", "1.5").unwrap(), Ordering::Greater);
        assert_eq!(
            compare_decimals("0.000000000000000001", "0.000000000000000002").unwrap(),
            Ordering::Less
        );
    }

    #[test]
    fn test_compare_negative_values() {
        assert_eq!(compare_decimals("-5", "1").unwrap(), Ordering::Less);
        assert_eq!(compare_decimals("1", "-5").unwrap(), Ordering::Greater);
        assert_eq!(compare_decimals("-5", "-1").unwrap(), Ordering::Less);
        assert_eq!(compare_decimals("-1.5", "-1.25").unwrap(), Ordering::Less);
        assert_eq!(compare_decimals("-0", "0").unwrap(), Ordering::Equal);
        assert_eq!(compare_decimals("-0.0", "+0").unwrap(), Ordering::Equal);
    }

    #[test]
    fn test_compare_truncates_past_precision() {
        assert_eq!(
            compare_decimals("1.0000000000000000001", "1").unwrap(),
            Ordering::Equal
        );
        assert_eq!(
            compare_decimals_at("1.239", "1.23", 2).unwrap(),
            Ordering::Equal
        );
    }

    #[test]
    fn test_compare_rejects_malformed() {
        assert!(matches!(
            compare_decimals("1.2.3", "1"),
            Err(Error::InvalidDecimal(_))
        ));
        assert!(matches!(
            compare_decimals("1e3", "1000"),
            Err(Error::InvalidDecimal(_))
        ));
        assert!(matches!(
            compare_decimals("12abc", "12"),
            Err(Error::InvalidDecimal(_))
        ));
    }

    #[test]
    fn test_compare_overflow() {
        let huge = format!("1{}", "0".repeat(25));
        assert!(matches!(
            compare_decimals(&huge, "1"),
            Err(Error::PrecisionOverflow(_))
        ));
    }

    #[test]
    fn test_is_amount_valid_equal_and_above() {
        assert!(is_amount_valid("10", 10.0, DEFAULT_DECIMALS));
        assert!(!is_amount_valid("10.01", 10.0, DEFAULT_DECIMALS));
        assert!(is_amount_valid("9.999999999999999999", 10.0, DEFAULT_DECIMALS));
        assert!(is_amount_valid(10.0, 10.0, DEFAULT_DECIMALS));
    }

    #[test]
    fn test_is_amount_valid_no_float_error() {
        // 0.1 + 0.2 renders as 0.30000000000000004
        assert!(is_amount_valid("0.3", 0.1 + 0.2, DEFAULT_DECIMALS));
        assert!(!is_amount_valid("0.30000000000000004", 0.3, DEFAULT_DECIMALS));
    }

    #[test]
    fn test_check_amount_falls_back_for_scientific() {
        let check = check_amount("1e1", 10.0, DEFAULT_DECIMALS);
        assert!(check.valid);
        assert!(check.used_fallback());

        let check = check_amount("1.1e1", 10.0, DEFAULT_DECIMALS);
        assert!(!check.valid);
        assert!(check.used_fallback());
    }

    #[test]
    fn test_check_amount_fallback_tolerates_dust() {
        // 10.00000000001 exceeds the balance by 1e-11
        let check = check_amount("1.000000000001e1", 10.0, DEFAULT_DECIMALS);
        assert!(check.valid);
        assert!(check.used_fallback());
    }

    #[test]
    fn test_check_amount_garbage_is_invalid() {
        let check = check_amount("abc", 10.0, DEFAULT_DECIMALS);
        assert!(!check.valid);
        assert!(check.used_fallback());
    }

    #[test]
    fn test_check_amount_exact_path() {
        let check = check_amount("5", 10.0, 6);
        assert_eq!(
            check,
            AmountCheck {
                valid: true,
                strategy: CheckStrategy::Exact
            }
        );
    }

    #[test]
    fn test_format_max_amount_strips_trailing_zeros() {
        assert_eq!(format_max_amount(123.4500, DEFAULT_DECIMALS), "123.45");
        assert_eq!(format_max_amount(100.0, DEFAULT_DECIMALS), "100");
    }

    #[test]
    fn test_format_max_amount_truncates_to_decimals() {
        assert_eq!(format_max_amount(123.456789, 6), "123.456789");
        assert_eq!(format_max_amount(123.4567891234, 6), "123.456789");
        assert_eq!(format_max_amount(1.999, 2), "1.99");
        assert_eq!(format_max_amount(5.7, 0), "5");
    }

    #[test]
    fn test_format_max_amount_large_balance() {
        assert_eq!(format_max_amount(1e20, DEFAULT_DECIMALS), "100000000000000000000");
        assert_eq!(format_max_amount(1e15 + 0.5, DEFAULT_DECIMALS), "1000000000000000");
        assert_eq!(
            format_max_amount(1.2345678901234567e18, DEFAULT_DECIMALS),
            "1234567890123456800"
        );
    }

    #[test]
    fn test_format_max_amount_large_balance_equals_balance_string() {
        for &balance in &[1.2345678901234567e18, 9.87654321e16, 1e15 + 3.0, 1e20] {
            let max = format_max_amount(balance, DEFAULT_DECIMALS);
            assert_eq!(
                compare_decimals(&max, &balance.to_string()).unwrap(),
                Ordering::Equal,
                "max {} of {}",
                max,
                balance
            );
            assert!(is_max_amount(&max, balance));
        }
    }

    #[test]
    fn test_compare_rejects_unbounded_precision() {
        assert!(compare_decimals_at("0", "0", MAX_PRECISION).is_ok());
        assert!(matches!(
            compare_decimals_at("0", "0", u32::MAX),
            Err(Error::PrecisionOverflow(_))
        ));

        let check = check_amount("1", 2.0, 4_000_000_000);
        assert!(check.valid);
        assert!(check.used_fallback());
    }

    #[test]
    fn test_format_max_amount_small_balance() {
        assert_eq!(format_max_amount(1e-7, DEFAULT_DECIMALS), "0.0000001");
        assert_eq!(format_max_amount(1e-7, 6), "0");
    }

    #[test]
    fn test_format_max_amount_round_trip() {
        let balances = [
            1e-9, 2.5e-7, 0.000123, 0.1 + 0.2, 1.0, 123.4567891234, 999.999, 25_000.75,
            1e15 + 0.5, 1e20, 3.7e22,
        ];
        for &balance in &balances {
            for decimals in 0..=18 {
                let max = format_max_amount(balance, decimals);
                assert!(
                    is_amount_valid(max.as_str(), balance, decimals),
                    "max {} should be spendable from {} at {} decimals",
                    max,
                    balance,
                    decimals
                );
                assert!(fraction_len(&max) <= decimals as usize);
            }
        }
    }

    #[test]
    fn test_format_max_amount_equals_balance_when_representable() {
        for &balance in &[0.5, 10.0, 123.45, 42.123456] {
            let max = format_max_amount(balance, DEFAULT_DECIMALS);
            assert_eq!(
                compare_decimals(&max, &number_to_string(balance)).unwrap(),
                Ordering::Equal
            );
        }
    }

    #[test]
    fn test_is_max_amount_exact_text() {
        for &balance in &[123.45, 1e20, 1e-7, 0.1 + 0.2] {
            let max = format_max_amount(balance, DEFAULT_DECIMALS);
            assert!(is_max_amount(&max, balance));
        }
        assert!(is_max_amount("123.45", 123.45));
        // Decimal-equal but typed differently is not a MAX selection
        assert!(!is_max_amount("123.450", 123.45));
    }
}
