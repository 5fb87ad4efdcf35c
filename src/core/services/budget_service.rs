//! Budget usage and savings-goal progress calculations.

use std::fmt;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{total_amount, Category, SavingsGoal, Transaction};
use crate::errors::{FinanceError, Result};
use crate::ledger::Ledger;

/// Usage band driving progress coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressStatus {
    /// Below 70%.
    Nominal,
    /// From 70% up to, but excluding, 90%.
    Warning,
    /// 90% and above.
    Critical,
}

impl ProgressStatus {
    pub const WARNING_THRESHOLD: f64 = 70.0;
    pub const CRITICAL_THRESHOLD: f64 = 90.0;

    pub fn from_percent(percent: f64) -> Self {
        if percent < Self::WARNING_THRESHOLD {
            ProgressStatus::Nominal
        } else if percent < Self::CRITICAL_THRESHOLD {
            ProgressStatus::Warning
        } else {
            ProgressStatus::Critical
        }
    }
}

impl fmt::Display for ProgressStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProgressStatus::Nominal => "Nominal",
            ProgressStatus::Warning => "Warning",
            ProgressStatus::Critical => "Critical",
        };
        f.write_str(label)
    }
}

/// Spend-versus-budget view for one expense category.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetProgress {
    pub category_id: Uuid,
    pub name: String,
    pub color: String,
    pub budget: f64,
    pub spent: f64,
    /// `budget - spent`, negative when over budget.
    pub remaining: f64,
    /// Unclamped usage; the status band is derived from this value.
    pub percent_used: f64,
    /// Rounded usage capped at 100, for progress bars.
    pub display_percent: u32,
    pub status: ProgressStatus,
}

impl BudgetProgress {
    pub fn is_over_budget(&self) -> bool {
        self.remaining < 0.0
    }
}

/// Progress view for one savings goal.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalProgress {
    pub goal_id: Uuid,
    pub name: String,
    pub color: String,
    pub current: f64,
    pub target: f64,
    pub remaining: f64,
    pub percent: f64,
    pub days_left: i64,
}

pub struct BudgetService;

impl BudgetService {
    /// Total of expense transactions booked against the category.
    pub fn spent(transactions: &[Transaction], category_id: Uuid) -> f64 {
        total_amount(
            transactions
                .iter()
                .filter(|txn| txn.is_expense() && txn.category_id == category_id),
        )
    }

    /// Budget left after `spent`; there is no floor.
    pub fn remaining(budget: f64, spent: f64) -> f64 {
        budget - spent
    }

    /// Raw usage percentage. A zero budget counts as fully used once anything
    /// has been spent against it.
    pub fn usage_percent(spent: f64, budget: f64) -> f64 {
        if budget > 0.0 {
            spent * 100.0 / budget
        } else if spent > 0.0 {
            100.0
        } else {
            0.0
        }
    }

    pub fn category_progress(category: &Category, transactions: &[Transaction]) -> BudgetProgress {
        let budget = category.effective_budget();
        let spent = Self::spent(transactions, category.id);
        let percent_used = Self::usage_percent(spent, budget);
        BudgetProgress {
            category_id: category.id,
            name: category.name.clone(),
            color: category.color.clone(),
            budget,
            spent,
            remaining: Self::remaining(budget, spent),
            percent_used,
            display_percent: percent_used.round().clamp(0.0, 100.0) as u32,
            status: ProgressStatus::from_percent(percent_used),
        }
    }

    /// Progress for every expense category that has a budget, in ledger order.
    pub fn budget_progress(ledger: &Ledger) -> Vec<BudgetProgress> {
        ledger
            .categories
            .iter()
            .filter(|category| category.has_budget())
            .map(|category| Self::category_progress(category, &ledger.transactions))
            .collect()
    }

    /// `min(current / target * 100, 100)`. Targets must be positive and finite.
    pub fn goal_progress(current: f64, target: f64) -> Result<f64> {
        if !(target.is_finite() && target > 0.0) {
            return Err(FinanceError::InvalidAmount(format!(
                "goal target must be a positive number (got {target})"
            )));
        }
        if !current.is_finite() {
            return Err(FinanceError::InvalidAmount(format!(
                "goal balance must be a finite number (got {current})"
            )));
        }
        Ok((current * 100.0 / target).min(100.0))
    }

    pub fn goal_summary(goal: &SavingsGoal, today: NaiveDate) -> Result<GoalProgress> {
        let percent = Self::goal_progress(goal.current_amount, goal.target_amount)?;
        Ok(GoalProgress {
            goal_id: goal.id,
            name: goal.name.clone(),
            color: goal.color.clone(),
            current: goal.current_amount,
            target: goal.target_amount,
            remaining: goal.remaining_amount(),
            percent,
            days_left: goal.days_left(today),
        })
    }

    /// Summaries for the first `limit` goals (all when `None`). Goals whose
    /// progress is undefined are skipped.
    pub fn goal_summaries(
        goals: &[SavingsGoal],
        today: NaiveDate,
        limit: Option<usize>,
    ) -> Vec<GoalProgress> {
        goals
            .iter()
            .take(limit.unwrap_or(usize::MAX))
            .filter_map(|goal| match Self::goal_summary(goal, today) {
                Ok(summary) => Some(summary),
                Err(err) => {
                    tracing::warn!(goal = %goal.name, error = %err, "skipping goal with undefined progress");
                    None
                }
            })
            .collect()
    }
}
