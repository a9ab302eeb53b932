use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::item::{Item, ItemKind, Percentage};

/// How the ledger picks the id of a newly added item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdPolicy {
    /// `last surviving id + 1`, or `0` for an empty sequence. Removing the
    /// newest item lets its id be handed out again.
    #[default]
    FollowLast,
    /// Per-kind counter that only moves forward; ids are never reissued.
    Monotonic,
}

/// Aggregates as of the last [`Ledger::recompute_budget`] call.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct BudgetSnapshot {
    pub budget: f64,
    pub total_income: f64,
    pub total_expense: f64,
    pub spent_percentage: Percentage,
}

/// Per-kind high-water mark of issued ids, kept under either policy.
#[derive(Debug, Clone, Copy, Default)]
struct NextIds {
    income: u64,
    expense: u64,
}

impl NextIds {
    fn slot(&mut self, kind: ItemKind) -> &mut u64 {
        match kind {
            ItemKind::Income => &mut self.income,
            ItemKind::Expense => &mut self.expense,
        }
    }

    fn any_issued(&self) -> bool {
        self.income > 0 || self.expense > 0
    }
}

/// In-memory owner of every income and expense item plus the derived totals.
///
/// Derived values are never refreshed implicitly: after `add_item` or
/// `remove_item` the caller runs [`recompute_budget`](Self::recompute_budget)
/// and then [`recompute_percentages`](Self::recompute_percentages) (or
/// [`recompute`](Self::recompute)) before reading aggregates.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    incomes: Vec<Item>,
    expenses: Vec<Item>,
    totals: BudgetSnapshot,
    id_policy: IdPolicy,
    next_ids: NextIds,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id_policy(id_policy: IdPolicy) -> Self {
        Self {
            id_policy,
            ..Self::default()
        }
    }

    pub fn id_policy(&self) -> IdPolicy {
        self.id_policy
    }

    /// Switches the policy in place. Issued-id history is kept, so a later
    /// `Monotonic` ledger still skips every id handed out before the switch.
    pub fn set_id_policy(&mut self, id_policy: IdPolicy) {
        if self.id_policy != id_policy {
            debug!(from = ?self.id_policy, to = ?id_policy, "id policy changed");
        }
        self.id_policy = id_policy;
    }

    /// True once any item has been added, even if all were removed since.
    pub fn has_issued_ids(&self) -> bool {
        self.next_ids.any_issued()
    }

    /// Appends a new item of `kind` and returns a copy of it.
    ///
    /// Input is not validated here; callers reject empty descriptions and
    /// non-positive values before getting this far.
    pub fn add_item(&mut self, kind: ItemKind, description: impl Into<String>, value: f64) -> Item {
        let id = self.next_id(kind);
        let item = Item::new(id, kind, description.into(), value);
        debug!(kind = kind.tag(), id, value, "item added");
        self.items_mut(kind).push(item.clone());
        item
    }

    /// Removes the item with exactly this id. Unknown ids are a no-op.
    pub fn remove_item(&mut self, kind: ItemKind, id: u64) -> Option<Item> {
        let items = self.items_mut(kind);
        let index = items.iter().position(|item| item.id() == id)?;
        let removed = items.remove(index);
        debug!(kind = kind.tag(), id, "item removed");
        Some(removed)
    }

    pub fn recompute_budget(&mut self) {
        let total_income = sum(&self.incomes);
        let total_expense = sum(&self.expenses);
        self.totals = BudgetSnapshot {
            budget: total_income - total_expense,
            total_income,
            total_expense,
            spent_percentage: Percentage::of(total_expense, total_income),
        };
        trace!(
            total_income,
            total_expense,
            budget = self.totals.budget,
            "budget recomputed"
        );
    }

    /// Refreshes every expense's share of income from the stored income total.
    pub fn recompute_percentages(&mut self) {
        let total_income = self.totals.total_income;
        for item in &mut self.expenses {
            item.calc_percentage(total_income);
        }
        trace!(expenses = self.expenses.len(), "percentages recomputed");
    }

    /// Runs both recompute phases in order.
    pub fn recompute(&mut self) {
        self.recompute_budget();
        self.recompute_percentages();
    }

    pub fn budget_snapshot(&self) -> BudgetSnapshot {
        self.totals
    }

    /// Percentages aligned with [`expenses`](Self::expenses).
    pub fn expense_percentages(&self) -> Vec<Percentage> {
        self.expenses.iter().map(Item::percentage).collect()
    }

    pub fn items(&self, kind: ItemKind) -> &[Item] {
        match kind {
            ItemKind::Income => &self.incomes,
            ItemKind::Expense => &self.expenses,
        }
    }

    pub fn incomes(&self) -> &[Item] {
        &self.incomes
    }

    pub fn expenses(&self) -> &[Item] {
        &self.expenses
    }

    /// Live sum of the current items of `kind`, independent of the stored totals.
    pub fn total(&self, kind: ItemKind) -> f64 {
        sum(self.items(kind))
    }

    pub fn item(&self, kind: ItemKind, id: u64) -> Option<&Item> {
        self.items(kind).iter().find(|item| item.id() == id)
    }

    pub fn len(&self) -> usize {
        self.incomes.len() + self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.incomes.is_empty() && self.expenses.is_empty()
    }

    fn items_mut(&mut self, kind: ItemKind) -> &mut Vec<Item> {
        match kind {
            ItemKind::Income => &mut self.incomes,
            ItemKind::Expense => &mut self.expenses,
        }
    }

    fn next_id(&mut self, kind: ItemKind) -> u64 {
        let follow_last = self
            .items(kind)
            .last()
            .map(|item| item.id() + 1)
            .unwrap_or(0);
        let policy = self.id_policy;
        let slot = self.next_ids.slot(kind);
        let id = match policy {
            IdPolicy::FollowLast => follow_last,
            IdPolicy::Monotonic => (*slot).max(follow_last),
        };
        *slot = (*slot).max(id + 1);
        id
    }
}

fn sum(items: &[Item]) -> f64 {
    items.iter().map(Item::value).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(ledger: &Ledger, kind: ItemKind) -> Vec<u64> {
        ledger.items(kind).iter().map(Item::id).collect()
    }

    #[test]
    fn ids_are_tracked_per_kind() {
        let mut ledger = Ledger::new();
        assert_eq!(ledger.add_item(ItemKind::Income, "Salary", 1000.0).id(), 0);
        assert_eq!(ledger.add_item(ItemKind::Expense, "Rent", 300.0).id(), 0);
        assert_eq!(ledger.add_item(ItemKind::Income, "Bonus", 50.0).id(), 1);
        assert_eq!(ledger.len(), 3);
    }

    #[test]
    fn follow_last_reissues_removed_tail_id() {
        let mut ledger = Ledger::new();
        for name in ["a", "b", "c"] {
            ledger.add_item(ItemKind::Expense, name, 10.0);
        }
        ledger.remove_item(ItemKind::Expense, 2);
        let item = ledger.add_item(ItemKind::Expense, "d", 10.0);
        assert_eq!(item.id(), 2);
    }

    #[test]
    fn follow_last_restarts_at_zero_once_emptied() {
        let mut ledger = Ledger::new();
        ledger.add_item(ItemKind::Income, "a", 10.0);
        ledger.add_item(ItemKind::Income, "b", 10.0);
        ledger.remove_item(ItemKind::Income, 0);
        ledger.remove_item(ItemKind::Income, 1);
        assert_eq!(ledger.add_item(ItemKind::Income, "c", 10.0).id(), 0);
    }

    #[test]
    fn monotonic_policy_never_reissues() {
        let mut ledger = Ledger::with_id_policy(IdPolicy::Monotonic);
        for name in ["a", "b", "c"] {
            ledger.add_item(ItemKind::Expense, name, 10.0);
        }
        ledger.remove_item(ItemKind::Expense, 2);
        ledger.remove_item(ItemKind::Expense, 1);
        assert_eq!(ledger.add_item(ItemKind::Expense, "d", 10.0).id(), 3);
        ledger.remove_item(ItemKind::Expense, 0);
        ledger.remove_item(ItemKind::Expense, 3);
        assert!(ledger.expenses().is_empty());
        assert_eq!(ledger.add_item(ItemKind::Expense, "e", 10.0).id(), 4);
        assert_eq!(ledger.add_item(ItemKind::Income, "f", 10.0).id(), 0);
    }

    #[test]
    fn issued_ids_are_remembered_after_removal() {
        let mut ledger = Ledger::new();
        assert!(!ledger.has_issued_ids());
        ledger.add_item(ItemKind::Expense, "a", 1.0);
        ledger.remove_item(ItemKind::Expense, 0);
        assert!(ledger.is_empty());
        assert!(ledger.has_issued_ids());
    }

    #[test]
    fn switching_to_monotonic_skips_ids_issued_under_follow_last() {
        let mut ledger = Ledger::new();
        ledger.add_item(ItemKind::Expense, "a", 1.0);
        ledger.add_item(ItemKind::Expense, "b", 1.0);
        ledger.remove_item(ItemKind::Expense, 1);
        ledger.remove_item(ItemKind::Expense, 0);

        ledger.set_id_policy(IdPolicy::Monotonic);
        assert_eq!(ledger.id_policy(), IdPolicy::Monotonic);
        assert_eq!(ledger.add_item(ItemKind::Expense, "c", 1.0).id(), 2);
    }

    #[test]
    fn live_total_ignores_stale_snapshot() {
        let mut ledger = Ledger::new();
        ledger.add_item(ItemKind::Income, "a", 2.5);
        ledger.add_item(ItemKind::Income, "b", 4.0);
        assert_eq!(ledger.total(ItemKind::Income), 6.5);
        assert_eq!(ledger.budget_snapshot().total_income, 0.0);
        assert_eq!(ledger.total(ItemKind::Expense), 0.0);
    }

    #[test]
    fn remove_keeps_relative_order() {
        let mut ledger = Ledger::new();
        for name in ["a", "b", "c", "d"] {
            ledger.add_item(ItemKind::Income, name, 1.0);
        }
        let removed = ledger.remove_item(ItemKind::Income, 1).expect("present");
        assert_eq!(removed.description(), "b");
        assert_eq!(ids(&ledger, ItemKind::Income), vec![0, 2, 3]);
        assert!(ledger.item(ItemKind::Income, 1).is_none());
    }

    #[test]
    fn remove_unknown_id_is_noop() {
        let mut ledger = Ledger::new();
        ledger.add_item(ItemKind::Income, "a", 1.0);
        assert!(ledger.remove_item(ItemKind::Income, 7).is_none());
        assert!(ledger.remove_item(ItemKind::Expense, 0).is_none());
        assert_eq!(ids(&ledger, ItemKind::Income), vec![0]);
    }

    #[test]
    fn aggregates_are_stale_until_recomputed() {
        let mut ledger = Ledger::new();
        ledger.add_item(ItemKind::Income, "Salary", 1000.0);
        assert_eq!(ledger.budget_snapshot(), BudgetSnapshot::default());
        ledger.recompute_budget();
        assert_eq!(ledger.budget_snapshot().total_income, 1000.0);
    }

    #[test]
    fn percentages_use_stored_income_total() {
        let mut ledger = Ledger::new();
        ledger.add_item(ItemKind::Income, "A", 200.0);
        ledger.add_item(ItemKind::Expense, "B", 50.0);
        // budget not recomputed yet, so income total is still zero
        ledger.recompute_percentages();
        assert_eq!(ledger.expense_percentages(), vec![Percentage::UNDEFINED]);
        ledger.recompute_budget();
        ledger.recompute_percentages();
        assert_eq!(ledger.expense_percentages(), vec![Percentage::from(25u32)]);
    }

    #[test]
    fn recompute_runs_both_phases() {
        let mut ledger = Ledger::new();
        ledger.add_item(ItemKind::Income, "Salary", 400.0);
        ledger.add_item(ItemKind::Expense, "Food", 100.0);
        ledger.recompute();
        let snapshot = ledger.budget_snapshot();
        assert_eq!(snapshot.budget, 300.0);
        assert_eq!(snapshot.spent_percentage.value(), Some(25));
        assert_eq!(ledger.expenses()[0].percentage().value(), Some(25));
    }
}
