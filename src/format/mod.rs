//! Display formatting for amounts, percentages, and the month header.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::ledger::{ItemKind, Percentage};

/// Amounts are always shown with two decimals.
pub const AMOUNT_PRECISION: u8 = 2;

/// Separator preferences applied to every rendered amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleConfig {
    pub decimal_separator: char,
    pub grouping_separator: char,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            decimal_separator: '.',
            grouping_separator: ',',
        }
    }
}

pub fn format_number(locale: &LocaleConfig, value: f64, precision: u8) -> String {
    let body = format!("{:.*}", precision as usize, value);
    let (int_part, frac_part) = match body.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (body.as_str(), None),
    };
    let grouped = match int_part.strip_prefix('-') {
        Some(digits) => format!("-{}", group_digits(digits, locale.grouping_separator)),
        None => group_digits(int_part, locale.grouping_separator),
    };
    match frac_part {
        Some(frac) => format!("{}{}{}", grouped, locale.decimal_separator, frac),
        None => grouped,
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx != 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

/// Item amount with its kind's sign, e.g. `+ 1,000.00` or `- 42.50`.
pub fn format_item_amount(locale: &LocaleConfig, kind: ItemKind, value: f64) -> String {
    let sign = match kind {
        ItemKind::Income => '+',
        ItemKind::Expense => '-',
    };
    format!(
        "{} {}",
        sign,
        format_number(locale, value.abs(), AMOUNT_PRECISION)
    )
}

/// Net budget, signed like an income when non-negative.
pub fn format_budget(locale: &LocaleConfig, budget: f64) -> String {
    let kind = if budget < 0.0 {
        ItemKind::Expense
    } else {
        ItemKind::Income
    };
    format_item_amount(locale, kind, budget)
}

pub fn format_percentage(percentage: Percentage) -> String {
    percentage.to_string()
}

/// `"October 2026"` style label for the budget header.
pub fn format_month(date: impl Datelike) -> String {
    format!("{} {}", month_name(date.month()), date.year())
}

fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "",
    }
}
