//! Income/expense items and the ledger that aggregates them.

pub mod item;
#[allow(clippy::module_inception)]
pub mod ledger;

pub use item::{Item, ItemKind, Percentage, UnknownKind};
pub use ledger::{BudgetSnapshot, IdPolicy, Ledger};
