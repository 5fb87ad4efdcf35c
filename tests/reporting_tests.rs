mod common;

use budget_tracker::{
    core::services::{
        BudgetService, DashboardOptions, ProgressStatus, SummaryService, TransactionFilter,
        TransactionService,
    },
    domain::{EntryType, Transaction},
};
use common::{date, household_ledger, today};

#[test]
fn expense_totals_follow_category_order_and_skip_unused() {
    let household = household_ledger();
    let ledger = &household.ledger;

    let totals =
        SummaryService::category_totals(&ledger.transactions, &ledger.categories, EntryType::Expense);

    let rows: Vec<(&str, f64)> = totals.iter().map(|t| (t.name.as_str(), t.value)).collect();
    assert_eq!(rows, vec![("Rent", 1500.0), ("Groceries", 300.0)]);
    assert_eq!(totals[0].color, "#EF4444");
}

#[test]
fn orphaned_transactions_do_not_count_toward_any_category() {
    let mut household = household_ledger();
    household.ledger.push_transaction(Transaction::expense(
        75.0,
        uuid::Uuid::new_v4(),
        date(2024, 6, 3),
    ));
    let ledger = &household.ledger;

    let sum: f64 =
        SummaryService::category_totals(&ledger.transactions, &ledger.categories, EntryType::Expense)
            .iter()
            .map(|t| t.value)
            .sum();

    assert_eq!(sum, 1800.0);
}

#[test]
fn six_month_series_ends_with_the_current_month() {
    let household = household_ledger();

    let series = SummaryService::monthly_series(&household.ledger.transactions, 6, today());

    let labels: Vec<&str> = series.iter().map(|m| m.label.as_str()).collect();
    assert_eq!(
        labels,
        vec!["Jan 2024", "Feb 2024", "Mar 2024", "Apr 2024", "May 2024", "Jun 2024"]
    );
    assert!(series[..3].iter().all(|m| m.income == 0.0 && m.expense == 0.0));
    assert_eq!(series[4].expense, 620.0);
    assert_eq!(series[5].savings, 3000.0 - 680.0);
}

#[test]
fn budget_progress_covers_every_budgeted_expense_category() {
    let household = household_ledger();

    let progress = BudgetService::budget_progress(&household.ledger);

    let names: Vec<&str> = progress.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Rent", "Groceries", "Entertainment"]);

    // Budgets are compared against all-time spending.
    let rent = &progress[0];
    assert_eq!(rent.spent, 1500.0);
    assert_eq!(rent.remaining, -1000.0);
    assert_eq!(rent.display_percent, 100);
    assert_eq!(rent.status, ProgressStatus::Critical);

    let fun = &progress[2];
    assert_eq!(fun.spent, 0.0);
    assert_eq!(fun.status, ProgressStatus::Nominal);
}

#[test]
fn totals_and_savings_rate() {
    let household = household_ledger();

    let totals = SummaryService::totals(&household.ledger.transactions);

    assert_eq!(totals.income, 9000.0);
    assert_eq!(totals.expense, 1800.0);
    assert_eq!(totals.balance, 7200.0);
    assert_eq!(totals.savings_rate, 80);
}

#[test]
fn search_and_grouping_for_the_transaction_list() {
    let household = household_ledger();
    let filter = TransactionFilter::of_type(EntryType::Expense).with_search("groc");

    let matching = TransactionService::filter(&household.ledger, &filter);
    let groups = SummaryService::group_by_month(&matching);

    assert_eq!(matching.len(), 2);
    let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
    assert_eq!(labels, vec!["June 2024", "May 2024"]);
}

#[test]
fn dashboard_honours_widget_limits() {
    let household = household_ledger();
    let options = DashboardOptions {
        months: 3,
        recent_limit: 2,
        goal_limit: 1,
    };

    let snapshot = SummaryService::dashboard(&household.ledger, today(), options);

    assert_eq!(snapshot.month_label, "June 2024");
    assert_eq!(snapshot.monthly.len(), 3);
    assert_eq!(snapshot.goals.len(), 1);
    assert_eq!(snapshot.goals[0].percent, 25.0);
    assert_eq!(snapshot.recent.len(), 2);
    assert_eq!(snapshot.recent[0].date, date(2024, 6, 12));
    assert_eq!(snapshot.month_progress, 50.0);
}
