//! Aggregation helpers that turn the flat transaction list into dashboard views.

use std::cmp::Reverse;

use chrono::{Datelike, NaiveDate};
use uuid::Uuid;

use crate::core::services::{BudgetProgress, BudgetService, GoalProgress};
use crate::currency::{days_in_month, month_year_long, month_year_short};
use crate::domain::{total_amount, Category, EntryType, Transaction};
use crate::ledger::Ledger;

/// Number of months shown by the spending trend when none is requested.
pub const DEFAULT_MONTH_COUNT: usize = 6;

/// One slice of a category breakdown chart.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category_id: Uuid,
    pub name: String,
    pub value: f64,
    pub color: String,
}

/// Income, expense, and net savings for one calendar month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyAggregate {
    pub year: i32,
    pub month: u32,
    pub label: String,
    pub income: f64,
    pub expense: f64,
    /// `income - expense`; negative in months that ran a deficit.
    pub savings: f64,
}

/// Headline figures for the summary tiles.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerTotals {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
    /// Whole-number percentage of income kept; 0 without income.
    pub savings_rate: i64,
}

/// Transactions sharing a calendar month, for grouped listings.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthGroup<'a> {
    pub year: i32,
    pub month: u32,
    pub label: String,
    pub transactions: Vec<&'a Transaction>,
}

/// Sizes of the dashboard widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardOptions {
    pub months: usize,
    pub recent_limit: usize,
    pub goal_limit: usize,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            months: DEFAULT_MONTH_COUNT,
            recent_limit: 5,
            goal_limit: 3,
        }
    }
}

/// Everything the dashboard renders, derived from one ledger snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    pub today: NaiveDate,
    pub month_label: String,
    pub month_progress: f64,
    pub totals: LedgerTotals,
    pub expense_breakdown: Vec<CategoryTotal>,
    pub monthly: Vec<MonthlyAggregate>,
    pub budgets: Vec<BudgetProgress>,
    pub goals: Vec<GoalProgress>,
    pub recent: Vec<Transaction>,
}

pub struct SummaryService;

impl SummaryService {
    /// Sums `entry_type` transactions per category of the same type, in
    /// category order. Categories whose total is not positive are omitted so
    /// charts never draw empty slices.
    pub fn category_totals(
        transactions: &[Transaction],
        categories: &[Category],
        entry_type: EntryType,
    ) -> Vec<CategoryTotal> {
        let matching: Vec<&Transaction> = transactions
            .iter()
            .filter(|txn| txn.entry_type == entry_type)
            .collect();

        categories
            .iter()
            .filter(|category| category.entry_type == entry_type)
            .map(|category| CategoryTotal {
                category_id: category.id,
                name: category.name.clone(),
                value: matching
                    .iter()
                    .filter(|txn| txn.category_id == category.id)
                    .map(|txn| txn.amount)
                    .sum(),
                color: category.color.clone(),
            })
            .filter(|total| total.value > 0.0)
            .collect()
    }

    /// Exactly `month_count` calendar months ending with the month of `today`,
    /// oldest first. Empty months are reported with zeros.
    pub fn monthly_series(
        transactions: &[Transaction],
        month_count: usize,
        today: NaiveDate,
    ) -> Vec<MonthlyAggregate> {
        let anchor = today.year() * 12 + today.month0() as i32;
        (0..month_count)
            .rev()
            .map(|offset| {
                let index = anchor - offset as i32;
                let year = index.div_euclid(12);
                let month = index.rem_euclid(12) as u32 + 1;
                Self::month_aggregate(transactions, year, month)
            })
            .collect()
    }

    fn month_aggregate(transactions: &[Transaction], year: i32, month: u32) -> MonthlyAggregate {
        let (income, expense) = transactions
            .iter()
            .filter(|txn| txn.falls_in_month(year, month))
            .fold((0.0, 0.0), |(income, expense), txn| match txn.entry_type {
                EntryType::Income => (income + txn.amount, expense),
                EntryType::Expense => (income, expense + txn.amount),
            });
        MonthlyAggregate {
            year,
            month,
            label: month_year_short(year, month),
            income,
            expense,
            savings: income - expense,
        }
    }

    pub fn totals(transactions: &[Transaction]) -> LedgerTotals {
        let income = total_amount(transactions.iter().filter(|txn| txn.is_income()));
        let expense = total_amount(transactions.iter().filter(|txn| txn.is_expense()));
        let balance = income - expense;
        // Halves round toward positive infinity: -2.5 becomes -2.
        let savings_rate = if income > 0.0 {
            (balance * 100.0 / income + 0.5).floor() as i64
        } else {
            0
        };
        LedgerTotals {
            income,
            expense,
            balance,
            savings_rate,
        }
    }

    /// Share of the current month already elapsed, as a percentage.
    pub fn month_progress(today: NaiveDate) -> f64 {
        let total = days_in_month(today.year(), today.month());
        f64::from(today.day()) * 100.0 / f64::from(total)
    }

    /// Newest `limit` transactions by date. Same-day entries keep ledger order.
    pub fn recent(transactions: &[Transaction], limit: usize) -> Vec<&Transaction> {
        let mut sorted: Vec<&Transaction> = transactions.iter().collect();
        sorted.sort_by_key(|txn| Reverse(txn.date));
        sorted.truncate(limit);
        sorted
    }

    /// Groups transactions by calendar month, newest month first, keeping the
    /// input order inside each group.
    pub fn group_by_month<'a>(transactions: &[&'a Transaction]) -> Vec<MonthGroup<'a>> {
        let mut groups: Vec<MonthGroup<'a>> = Vec::new();
        for &txn in transactions {
            let (year, month) = (txn.date.year(), txn.date.month());
            match groups
                .iter_mut()
                .find(|group| group.year == year && group.month == month)
            {
                Some(group) => group.transactions.push(txn),
                None => groups.push(MonthGroup {
                    year,
                    month,
                    label: month_year_long(year, month),
                    transactions: vec![txn],
                }),
            }
        }
        groups.sort_by_key(|group| Reverse((group.year, group.month)));
        groups
    }

    pub fn dashboard(
        ledger: &Ledger,
        today: NaiveDate,
        options: DashboardOptions,
    ) -> DashboardSnapshot {
        DashboardSnapshot {
            today,
            month_label: month_year_long(today.year(), today.month()),
            month_progress: Self::month_progress(today),
            totals: Self::totals(&ledger.transactions),
            expense_breakdown: Self::category_totals(
                &ledger.transactions,
                &ledger.categories,
                EntryType::Expense,
            ),
            monthly: Self::monthly_series(&ledger.transactions, options.months, today),
            budgets: BudgetService::budget_progress(ledger),
            goals: BudgetService::goal_summaries(&ledger.goals, today, Some(options.goal_limit)),
            recent: Self::recent(&ledger.transactions, options.recent_limit)
                .into_iter()
                .cloned()
                .collect(),
        }
    }
}
