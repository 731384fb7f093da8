//! Amount input sanitisation and display formatting
//!
//! Display helpers round with `rust_decimal` so that what the user sees is
//! decimal-rounded, not binary-rounded.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use super::precision::MAX_PRECISION;
use super::result::{Error, Result};

/// Strip everything but digits and a single decimal point from typed input
///
/// Extra points are dropped (`"1.2.3"` becomes `"1.23"`) and one leading
/// zero in front of a digit is removed.
pub fn sanitize_numeric_input(value: &str) -> String {
    let filtered: String = value
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    let sanitized = match filtered.split_once('.') {
        Some((whole, rest)) => format!("{}.{}", whole, rest.replace('.', "")),
        None => filtered,
    };

    let bytes = sanitized.as_bytes();
    if bytes.len() > 1 && bytes[0] == b'0' && bytes[1] != b'.' {
        return sanitized[1..].to_string();
    }

    sanitized
}

/// Fractional digits for display when none are requested
fn auto_decimals(value: f64) -> u32 {
    let magnitude = value.abs();
    if magnitude >= 1000.0 {
        0
    } else if magnitude >= 1.0 {
        2
    } else if magnitude >= 0.01 {
        4
    } else {
        6
    }
}

/// Format a number with thousands separators and at most `decimals` fractional digits
pub fn format_number(value: f64, decimals: Option<u32>) -> String {
    if value == 0.0 {
        return "0".to_string();
    }

    let decimals = decimals.unwrap_or_else(|| auto_decimals(value));
    let Some(decimal) = Decimal::from_f64(value) else {
        return value.to_string();
    };

    let rounded = decimal
        .round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero)
        .normalize();

    group_thousands(&rounded.to_string())
}

/// Abbreviate with B / M / K suffixes
pub fn format_large_number(value: f64) -> String {
    if value >= 1e9 {
        format!("{}B", format_number(value / 1e9, Some(2)))
    } else if value >= 1e6 {
        format!("{}M", format_number(value / 1e6, Some(2)))
    } else if value >= 1e3 {
        format!("{}K", format_number(value / 1e3, Some(2)))
    } else {
        format_number(value, Some(2))
    }
}

/// Format a USD value with exactly two fractional digits
pub fn format_usd(value: f64) -> String {
    let Some(decimal) = Decimal::from_f64(value) else {
        return format!("${}", value);
    };

    let mut rounded = decimal.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);

    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-${}", group_thousands(&rounded.abs().to_string()))
    } else {
        format!("${}", group_thousands(&rounded.abs().to_string()))
    }
}

/// Format a ratio as a percentage (`0.05` is `"5%"`)
pub fn format_percentage(ratio: f64, decimals: u32) -> String {
    format!("{}%", format_number(ratio * 100.0, Some(decimals)))
}

fn group_thousands(text: &str) -> String {
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match fraction {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

/// Convert raw integer base units to a human decimal string
///
/// `format_token_amount("1500000", 6)` is `"1.5"`.
pub fn format_token_amount(raw: &str, decimals: u32) -> Result<String> {
    let value: u128 = raw
        .trim()
        .parse()
        .map_err(|_| Error::invalid_decimal(format!("'{}' is not a raw token amount", raw)))?;
    let divisor = 10u128
        .checked_pow(decimals)
        .ok_or_else(|| Error::overflow(format!("10^{} does not fit in 128 bits", decimals)))?;

    let whole = value / divisor;
    let fractional = value % divisor;
    if fractional == 0 {
        return Ok(whole.to_string());
    }

    let fractional = format!("{:0>width$}", fractional, width = decimals as usize);
    Ok(format!("{}.{}", whole, fractional.trim_end_matches('0')))
}

/// Convert a human decimal string to raw integer base units
///
/// Fractional digits beyond `decimals` are truncated.
pub fn parse_token_amount(amount: &str, decimals: u32) -> Result<String> {
    if decimals > MAX_PRECISION {
        return Err(Error::overflow(format!(
            "{} decimals exceed the supported {}",
            decimals, MAX_PRECISION
        )));
    }
    let text = amount.trim();
    let (whole, fractional) = text.split_once('.').unwrap_or((text, ""));

    if whole.is_empty() && fractional.is_empty() {
        return Err(Error::invalid_decimal(format!("'{}' has no digits", amount)));
    }
    if !whole.bytes().chain(fractional.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(Error::invalid_decimal(format!(
            "'{}' is not an unsigned decimal amount",
            amount
        )));
    }

    let mut raw = String::with_capacity(whole.len() + decimals as usize);
    raw.push_str(whole);
    raw.extend(
        fractional
            .chars()
            .chain(std::iter::repeat('0'))
            .take(decimals as usize),
    );

    let trimmed = raw.trim_start_matches('0');
    Ok(if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    })
}
