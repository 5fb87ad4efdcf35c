//! Cross-service properties over a shared ledger.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::core::services::{
    BudgetService, CategoryService, GoalService, SummaryService, TransactionService,
};
use crate::domain::{Category, EntryType, SavingsGoal, Transaction};
use crate::errors::FinanceError;
use crate::ledger::Ledger;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn household() -> Ledger {
    let mut ledger = Ledger::new();
    let salary = CategoryService::add(&mut ledger, Category::income("Salary")).unwrap();
    let rent = CategoryService::add(&mut ledger, Category::expense("Rent", 500.0)).unwrap();
    let food = CategoryService::add(&mut ledger, Category::expense("Food", 300.0)).unwrap();
    CategoryService::add(&mut ledger, Category::expense("Travel", 200.0)).unwrap();

    let entries = [
        (EntryType::Income, 3000.0, salary, date(2024, 4, 1)),
        (EntryType::Expense, 500.0, rent, date(2024, 4, 1)),
        (EntryType::Expense, 120.5, food, date(2024, 4, 9)),
        (EntryType::Expense, 80.25, food, date(2024, 5, 3)),
        (EntryType::Income, 3000.0, salary, date(2024, 5, 1)),
    ];
    for (kind, amount, category, on) in entries {
        TransactionService::add(&mut ledger, Transaction::new(kind, amount, category, on)).unwrap();
    }
    // Booked against a category that is not in the ledger.
    ledger.push_transaction(Transaction::expense(42.0, Uuid::new_v4(), date(2024, 5, 4)));
    ledger
}

#[test]
fn category_totals_conserve_money_of_known_categories() {
    let ledger = household();
    for kind in [EntryType::Income, EntryType::Expense] {
        let totals = SummaryService::category_totals(&ledger.transactions, &ledger.categories, kind);
        let charted: f64 = totals.iter().map(|total| total.value).sum();
        let expected: f64 = ledger
            .transactions
            .iter()
            .filter(|txn| txn.entry_type == kind && ledger.category(txn.category_id).is_some())
            .map(|txn| txn.amount)
            .sum();
        assert!((charted - expected).abs() < 1e-9, "{kind}: {charted} != {expected}");
    }
}

#[test]
fn monthly_series_matches_totals_when_window_covers_history() {
    let ledger = household();
    let series = SummaryService::monthly_series(&ledger.transactions, 12, date(2024, 5, 31));
    let totals = SummaryService::totals(&ledger.transactions);

    let income: f64 = series.iter().map(|m| m.income).sum();
    let expense: f64 = series.iter().map(|m| m.expense).sum();
    assert_eq!(series.len(), 12);
    assert_eq!(income, totals.income);
    assert!((expense - totals.expense).abs() < 1e-9);
}

#[test]
fn removing_an_unused_category_succeeds_after_its_transactions_go() {
    let mut ledger = household();
    let food = ledger.category_by_name("Food", None).map(|c| c.id).unwrap();

    let err = CategoryService::remove(&mut ledger, food).expect_err("in use");
    assert!(matches!(err, FinanceError::CategoryInUse { references: 2, .. }));

    let ids: Vec<Uuid> = ledger
        .transactions
        .iter()
        .filter(|txn| txn.category_id == food)
        .map(|txn| txn.id)
        .collect();
    for id in ids {
        TransactionService::remove(&mut ledger, id).unwrap();
    }
    CategoryService::remove(&mut ledger, food).unwrap();
    assert!(ledger.category(food).is_none());
}

#[test]
fn contribution_scenario_reports_twenty_six_percent() {
    let mut ledger = Ledger::new();
    let goal = SavingsGoal::new("Emergency Fund", 10000.0, date(2024, 12, 31)).with_current(2500.0);
    let id = GoalService::add(&mut ledger, goal).unwrap();

    let err = GoalService::contribute(&mut ledger, id, -5.0).expect_err("negative");
    assert!(matches!(err, FinanceError::InvalidAmount(_)));

    let balance = GoalService::contribute(&mut ledger, id, 100.0).unwrap();
    assert_eq!(balance, 2600.0);
    let summary = BudgetService::goal_summary(ledger.goal(id).unwrap(), date(2024, 6, 1)).unwrap();
    assert_eq!(summary.percent, 26.0);
}
