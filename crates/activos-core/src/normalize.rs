use chrono::Datelike;
use rust_decimal::Decimal;

use crate::error::DepreError;
use crate::types::{Money, RawCell};
use crate::DepreResult;

/// Parse a currency-formatted string by stripping every character that is
/// not a digit, `.` or `-`, then reading the residue as a decimal.
///
/// `"$ 1,234.56"` parses to `1234.56`; `"-$50.00"` parses to `-50`.
pub fn parse_currency(raw: &str) -> DepreResult<Money> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    cleaned
        .parse::<Decimal>()
        .map_err(|_| DepreError::CurrencyParse(raw.to_string()))
}

/// Currency parsing at the cell level: numeric cells pass through untouched,
/// text cells go through [`parse_currency`], anything else is unparseable.
pub fn parse_currency_cell(cell: &RawCell) -> DepreResult<Money> {
    match cell {
        RawCell::Number(n) => Ok(*n),
        RawCell::Text(s) => parse_currency(s),
        other => Err(DepreError::CurrencyParse(other.display())),
    }
}

/// Render a monetary value as US-locale currency text (`$1,234.56`).
/// Display only; never fed back into computation.
pub fn format_currency(value: Money) -> String {
    let rounded = value.round_dp(2);
    let formatted = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::new();
    for (i, ch) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let int_grouped: String = grouped.chars().rev().collect();

    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-${int_grouped}.{frac_part}")
    } else {
        format!("${int_grouped}.{frac_part}")
    }
}

/// Normalise a purchase-date cell into the canonical `DD-MM-YYYY` form.
///
/// Date-typed cells use their calendar parts directly; text cells must
/// already be day-month-year separated by `-` and are re-padded. The output
/// is always zero-padded `DD-MM-YYYY`.
pub fn parse_date_cell(cell: &RawCell) -> DepreResult<String> {
    match cell {
        RawCell::Date(d) => Ok(format!("{:02}-{:02}-{:04}", d.day(), d.month(), d.year())),
        RawCell::Text(s) => {
            let (day, month, year) = parse_canonical_date(s)?;
            Ok(format!("{day:02}-{month:02}-{year:04}"))
        }
        other => Err(DepreError::DateParse(other.display())),
    }
}

/// Split a canonical (or loosely padded) `D-M-YYYY` string into its parts,
/// validating calendar ranges.
pub fn parse_canonical_date(value: &str) -> DepreResult<(u32, u32, i32)> {
    let parts: Vec<&str> = value.trim().split('-').collect();
    if parts.len() != 3 {
        return Err(DepreError::DateParse(value.to_string()));
    }

    let day: u32 = parts[0]
        .trim()
        .parse()
        .map_err(|_| DepreError::DateParse(value.to_string()))?;
    let month: u32 = parts[1]
        .trim()
        .parse()
        .map_err(|_| DepreError::DateParse(value.to_string()))?;
    let year: i32 = parts[2]
        .trim()
        .parse()
        .map_err(|_| DepreError::DateParse(value.to_string()))?;

    if !(1..=31).contains(&day) || !(1..=12).contains(&month) {
        return Err(DepreError::DateParse(value.to_string()));
    }

    Ok((day, month, year))
}
