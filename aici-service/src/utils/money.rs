//! Amount parsing and locale-aware currency formatting.

use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use crate::config::LocaleSettings;

/// Parse user-entered amount text.
///
/// Accepts both `.` and `,` as the decimal separator and tolerates grouping
/// spaces, since the form is French-facing. Returns `None` on anything that
/// is not a plain decimal number.
pub fn parse_amount(text: &str) -> Option<Decimal> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    let normalized: String = trimmed
        .chars()
        .filter(|c| *c != ' ' && *c != '\u{a0}' && *c != '\u{202f}')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    Decimal::from_str(&normalized).ok()
}

/// Format a monetary amount per the configured locale, e.g. `1 234,56 €`.
///
/// The amount is rendered with exactly two decimals, grouped in threes.
pub fn format_currency(amount: Decimal, locale: &LocaleSettings) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let fixed = format!("{:.2}", rounded.abs());
    let (int_part, dec_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::new();
    let digits: Vec<char> = int_part.chars().collect();
    let mut count = 0;
    for i in (0..digits.len()).rev() {
        if count == 3 {
            grouped.push(locale.grouping_separator);
            count = 0;
        }
        grouped.push(digits[i]);
        count += 1;
    }
    let int_with_sep: String = grouped.chars().rev().collect();

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!(
        "{}{}{}{} {}",
        sign, int_with_sep, locale.decimal_separator, dec_part, locale.currency_symbol
    )
}
