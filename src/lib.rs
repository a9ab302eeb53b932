#![doc(test(attr(deny(warnings))))]

//! Budget Ledger keeps income and expense entries in memory and derives the
//! running totals, net budget, and each expense's share of income.
//!
//! ```
//! use budget_ledger::ledger::{ItemKind, Ledger};
//!
//! let mut ledger = Ledger::new();
//! ledger.add_item(ItemKind::Income, "Salary", 1000.0);
//! ledger.add_item(ItemKind::Expense, "Rent", 300.0);
//! ledger.recompute_budget();
//! ledger.recompute_percentages();
//!
//! let snapshot = ledger.budget_snapshot();
//! assert_eq!(snapshot.budget, 700.0);
//! assert_eq!(snapshot.spent_percentage.value(), Some(30));
//! ```

pub mod cli;
pub mod config;
pub mod errors;
pub mod format;
pub mod ledger;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Budget Ledger tracing initialized.");
    });
}
