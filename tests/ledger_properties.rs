use budget_ledger::ledger::{BudgetSnapshot, IdPolicy, Item, ItemKind, Ledger, Percentage};

fn ids(items: &[Item]) -> Vec<u64> {
    items.iter().map(Item::id).collect()
}

#[test]
fn ids_count_up_from_zero_per_kind() {
    let mut ledger = Ledger::new();
    let values = [12.5, 1.0, 9999.0, 0.01, 42.0];
    let assigned: Vec<u64> = values
        .iter()
        .enumerate()
        .map(|(idx, value)| {
            ledger
                .add_item(ItemKind::Expense, format!("item {idx}"), *value)
                .id()
        })
        .collect();
    assert_eq!(assigned, vec![0, 1, 2, 3, 4]);
    assert_eq!(ledger.add_item(ItemKind::Income, "first", 5.0).id(), 0);
}

#[test]
fn salary_and_rent_yield_expected_budget() {
    let mut ledger = Ledger::new();
    ledger.add_item(ItemKind::Income, "Salary", 1000.0);
    ledger.add_item(ItemKind::Expense, "Rent", 300.0);
    ledger.recompute_budget();

    let snapshot = ledger.budget_snapshot();
    assert_eq!(snapshot.total_income, 1000.0);
    assert_eq!(snapshot.total_expense, 300.0);
    assert_eq!(snapshot.budget, 700.0);
    assert_eq!(snapshot.spent_percentage.value(), Some(30));
}

#[test]
fn no_income_gives_undefined_spent_percentage() {
    let mut ledger = Ledger::new();
    ledger.add_item(ItemKind::Expense, "Coffee", 4.0);
    ledger.recompute_budget();

    let snapshot = ledger.budget_snapshot();
    assert_eq!(snapshot.total_income, 0.0);
    assert!(snapshot.spent_percentage.is_undefined());
    assert_eq!(snapshot.spent_percentage.to_sentinel(), Percentage::SENTINEL);
}

#[test]
fn empty_ledger_recomputes_to_zero() {
    let mut ledger = Ledger::new();
    ledger.recompute();
    assert_eq!(ledger.budget_snapshot(), BudgetSnapshot::default());
    assert!(ledger.expense_percentages().is_empty());
}

#[test]
fn removing_unassigned_id_changes_nothing() {
    let mut ledger = Ledger::new();
    ledger.add_item(ItemKind::Income, "Salary", 1000.0);
    ledger.add_item(ItemKind::Expense, "Rent", 300.0);
    ledger.recompute();
    let before = ledger.budget_snapshot();
    let incomes_before = ledger.incomes().to_vec();
    let expenses_before = ledger.expenses().to_vec();

    assert!(ledger.remove_item(ItemKind::Expense, 99).is_none());
    ledger.recompute();

    assert_eq!(ledger.budget_snapshot(), before);
    assert_eq!(ledger.incomes(), incomes_before.as_slice());
    assert_eq!(ledger.expenses(), expenses_before.as_slice());
}

#[test]
fn removing_all_income_leaves_negative_budget() {
    let mut ledger = Ledger::new();
    ledger.add_item(ItemKind::Income, "Salary", 1000.0);
    ledger.add_item(ItemKind::Income, "Bonus", 200.0);
    ledger.add_item(ItemKind::Expense, "Rent", 300.0);
    ledger.add_item(ItemKind::Expense, "Food", 150.0);
    ledger.remove_item(ItemKind::Income, 0);
    ledger.remove_item(ItemKind::Income, 1);
    ledger.recompute_budget();

    let snapshot = ledger.budget_snapshot();
    assert_eq!(snapshot.total_expense, 450.0);
    assert_eq!(snapshot.budget, -snapshot.total_expense);
    assert!(snapshot.spent_percentage.is_undefined());
}

#[test]
fn recompute_budget_is_idempotent() {
    let mut ledger = Ledger::new();
    ledger.add_item(ItemKind::Income, "Salary", 1234.56);
    ledger.add_item(ItemKind::Expense, "Rent", 789.01);
    ledger.recompute_budget();
    let first = ledger.budget_snapshot();
    ledger.recompute_budget();
    assert_eq!(ledger.budget_snapshot(), first);
}

#[test]
fn expense_percentage_follows_budget_recompute() {
    let mut ledger = Ledger::new();
    ledger.add_item(ItemKind::Income, "A", 200.0);
    ledger.add_item(ItemKind::Expense, "B", 50.0);
    ledger.recompute_budget();
    ledger.recompute_percentages();

    assert_eq!(ledger.expenses()[0].percentage().value(), Some(25));
    assert_eq!(ledger.expense_percentages(), vec![Percentage::from(25u32)]);
}

#[test]
fn percentages_align_with_expense_order() {
    let mut ledger = Ledger::new();
    ledger.add_item(ItemKind::Income, "Salary", 400.0);
    for value in [100.0, 2.0, 400.0] {
        ledger.add_item(ItemKind::Expense, "x", value);
    }
    ledger.recompute();
    let values: Vec<Option<u32>> = ledger
        .expense_percentages()
        .into_iter()
        .map(Percentage::value)
        .collect();
    assert_eq!(values, vec![Some(25), Some(1), Some(100)]);
}

#[test]
fn removing_middle_expense_preserves_order_and_ids() {
    let mut ledger = Ledger::new();
    ledger.add_item(ItemKind::Expense, "Rent", 300.0);
    ledger.add_item(ItemKind::Expense, "Food", 150.0);
    ledger.add_item(ItemKind::Expense, "Gym", 40.0);

    ledger.remove_item(ItemKind::Expense, 1);

    assert_eq!(ids(ledger.expenses()), vec![0, 2]);
    let names: Vec<&str> = ledger.expenses().iter().map(Item::description).collect();
    assert_eq!(names, vec!["Rent", "Gym"]);
}

#[test]
fn follow_last_policy_can_reissue_a_removed_id() {
    let mut ledger = Ledger::with_id_policy(IdPolicy::FollowLast);
    ledger.add_item(ItemKind::Income, "a", 1.0);
    ledger.add_item(ItemKind::Income, "b", 1.0);
    ledger.remove_item(ItemKind::Income, 1);
    assert_eq!(ledger.add_item(ItemKind::Income, "c", 1.0).id(), 1);
}

#[test]
fn monotonic_policy_never_reissues_a_removed_id() {
    let mut ledger = Ledger::with_id_policy(IdPolicy::Monotonic);
    ledger.add_item(ItemKind::Income, "a", 1.0);
    ledger.add_item(ItemKind::Income, "b", 1.0);
    ledger.remove_item(ItemKind::Income, 1);
    assert_eq!(ledger.add_item(ItemKind::Income, "c", 1.0).id(), 2);
    assert_eq!(ids(ledger.incomes()), vec![0, 2]);
}

#[test]
fn mutations_do_not_refresh_aggregates() {
    let mut ledger = Ledger::new();
    ledger.add_item(ItemKind::Income, "Salary", 1000.0);
    ledger.recompute();
    ledger.add_item(ItemKind::Expense, "Rent", 300.0);

    assert_eq!(ledger.budget_snapshot().budget, 1000.0);
    assert!(ledger.expenses()[0].percentage().is_undefined());
}
