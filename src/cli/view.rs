//! Plain-text rendering of ledger state for the shell.

use crate::format::{format_budget, format_item_amount, format_percentage, LocaleConfig};
use crate::ledger::{BudgetSnapshot, Item, ItemKind, Ledger};

pub fn render_summary(
    snapshot: &BudgetSnapshot,
    locale: &LocaleConfig,
    month: Option<&str>,
) -> Vec<String> {
    let heading = match month {
        Some(month) => format!("Available budget in {month}:"),
        None => "Available budget:".to_string(),
    };
    vec![
        heading,
        format_budget(locale, snapshot.budget),
        format!(
            "{:<10}{:>16}",
            "Income",
            format_item_amount(locale, ItemKind::Income, snapshot.total_income)
        ),
        format!(
            "{:<10}{:>16}  {}",
            "Expenses",
            format_item_amount(locale, ItemKind::Expense, snapshot.total_expense),
            format_percentage(snapshot.spent_percentage)
        ),
    ]
}

pub fn render_item_row(item: &Item, locale: &LocaleConfig) -> String {
    let amount = format_item_amount(locale, item.kind(), item.value());
    let row = format!("{:<8}{:<24}{:>16}", item.row_key(), item.description(), amount);
    match item.kind() {
        ItemKind::Expense => format!("{row}  {}", format_percentage(item.percentage())),
        ItemKind::Income => row,
    }
}

/// Income rows followed by expense rows, each under its own heading.
pub fn render_items(ledger: &Ledger, locale: &LocaleConfig) -> Vec<String> {
    let mut lines = Vec::new();
    for (heading, kind) in [("Income", ItemKind::Income), ("Expenses", ItemKind::Expense)] {
        lines.push(format!("{heading}:"));
        let items = ledger.items(kind);
        if items.is_empty() {
            lines.push("  (none)".to_string());
        }
        lines.extend(
            items
                .iter()
                .map(|item| format!("  {}", render_item_row(item, locale))),
        );
    }
    lines
}
