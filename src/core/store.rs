//! Single owner of tracker state. Every mutation is an action applied as one
//! state transition: the action runs against a working copy that replaces the
//! current ledger only when the whole action succeeds.

use std::fmt;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::core::services::{
    BudgetProgress, BudgetService, CategoryActivity, CategoryService, CategoryTotal,
    DashboardOptions, DashboardSnapshot, GoalProgress, GoalService, MonthlyAggregate,
    SummaryService, TransactionFilter, TransactionService,
};
use crate::core::time::{Clock, SystemClock};
use crate::domain::{Category, EntryType, SavingsGoal, Transaction};
use crate::errors::{EntityKind, FinanceError, Result};
use crate::ledger::Ledger;

/// Every state change the tracker supports.
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerAction {
    AddTransaction(Transaction),
    UpdateTransaction(Transaction),
    RemoveTransaction(Uuid),
    AddCategory(Category),
    UpdateCategory(Category),
    RemoveCategory(Uuid),
    AddSavingsGoal(SavingsGoal),
    UpdateSavingsGoal(SavingsGoal),
    RemoveSavingsGoal(Uuid),
    ContributeToGoal { id: Uuid, amount: f64 },
}

impl LedgerAction {
    pub fn name(&self) -> &'static str {
        match self {
            LedgerAction::AddTransaction(_) => "add_transaction",
            LedgerAction::UpdateTransaction(_) => "update_transaction",
            LedgerAction::RemoveTransaction(_) => "remove_transaction",
            LedgerAction::AddCategory(_) => "add_category",
            LedgerAction::UpdateCategory(_) => "update_category",
            LedgerAction::RemoveCategory(_) => "remove_category",
            LedgerAction::AddSavingsGoal(_) => "add_savings_goal",
            LedgerAction::UpdateSavingsGoal(_) => "update_savings_goal",
            LedgerAction::RemoveSavingsGoal(_) => "remove_savings_goal",
            LedgerAction::ContributeToGoal { .. } => "contribute_to_goal",
        }
    }
}

impl fmt::Display for LedgerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a successful action produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    Added(Uuid),
    Updated(Uuid),
    Removed(Uuid),
    Contributed { id: Uuid, current_amount: f64 },
}

impl ActionOutcome {
    pub fn id(&self) -> Uuid {
        match self {
            ActionOutcome::Added(id)
            | ActionOutcome::Updated(id)
            | ActionOutcome::Removed(id)
            | ActionOutcome::Contributed { id, .. } => *id,
        }
    }
}

/// Owns the ledger and serializes all writes through `&mut self`. Share it
/// across threads behind a lock to keep one writer at a time.
pub struct BudgetStore {
    ledger: Ledger,
    revision: u64,
    clock: Box<dyn Clock>,
}

impl BudgetStore {
    pub fn new(ledger: Ledger) -> Self {
        Self::with_clock(ledger, Box::new(SystemClock))
    }

    pub fn with_clock(ledger: Ledger, clock: Box<dyn Clock>) -> Self {
        Self {
            ledger,
            revision: 0,
            clock,
        }
    }

    /// Store seeded with the demo data, dated today.
    pub fn sample() -> Self {
        Self::sample_with_clock(Box::new(SystemClock))
    }

    pub fn sample_with_clock(clock: Box<dyn Clock>) -> Self {
        let ledger = Ledger::sample(clock.today());
        Self::with_clock(ledger, clock)
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Number of successful transitions applied so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Applies one action atomically. On error the ledger is left untouched.
    pub fn dispatch(&mut self, action: LedgerAction) -> Result<ActionOutcome> {
        let name = action.name();
        let mut next = self.ledger.clone();
        match Self::reduce(&mut next, action) {
            Ok(outcome) => {
                self.ledger = next;
                self.revision += 1;
                tracing::debug!(
                    action = name,
                    id = %outcome.id(),
                    revision = self.revision,
                    "applied ledger action"
                );
                Ok(outcome)
            }
            Err(err) => {
                tracing::warn!(action = name, error = %err, "ledger action refused");
                Err(err)
            }
        }
    }

    fn reduce(ledger: &mut Ledger, action: LedgerAction) -> Result<ActionOutcome> {
        let outcome = match action {
            LedgerAction::AddTransaction(txn) => {
                ActionOutcome::Added(TransactionService::add(ledger, txn)?)
            }
            LedgerAction::UpdateTransaction(txn) => {
                let id = txn.id;
                TransactionService::update(ledger, txn)?;
                ActionOutcome::Updated(id)
            }
            LedgerAction::RemoveTransaction(id) => {
                ActionOutcome::Removed(TransactionService::remove(ledger, id)?.id)
            }
            LedgerAction::AddCategory(category) => {
                ActionOutcome::Added(CategoryService::add(ledger, category)?)
            }
            LedgerAction::UpdateCategory(category) => {
                let id = category.id;
                CategoryService::update(ledger, category)?;
                ActionOutcome::Updated(id)
            }
            LedgerAction::RemoveCategory(id) => {
                ActionOutcome::Removed(CategoryService::remove(ledger, id)?.id)
            }
            LedgerAction::AddSavingsGoal(goal) => {
                ActionOutcome::Added(GoalService::add(ledger, goal)?)
            }
            LedgerAction::UpdateSavingsGoal(goal) => {
                let id = goal.id;
                GoalService::update(ledger, goal)?;
                ActionOutcome::Updated(id)
            }
            LedgerAction::RemoveSavingsGoal(id) => {
                ActionOutcome::Removed(GoalService::remove(ledger, id)?.id)
            }
            LedgerAction::ContributeToGoal { id, amount } => ActionOutcome::Contributed {
                id,
                current_amount: GoalService::contribute(ledger, id, amount)?,
            },
        };
        Ok(outcome)
    }

    pub fn add_transaction(&mut self, transaction: Transaction) -> Result<Uuid> {
        self.dispatch(LedgerAction::AddTransaction(transaction))
            .map(|outcome| outcome.id())
    }

    pub fn update_transaction(&mut self, transaction: Transaction) -> Result<()> {
        self.dispatch(LedgerAction::UpdateTransaction(transaction))
            .map(|_| ())
    }

    pub fn remove_transaction(&mut self, id: Uuid) -> Result<()> {
        self.dispatch(LedgerAction::RemoveTransaction(id)).map(|_| ())
    }

    pub fn add_category(&mut self, category: Category) -> Result<Uuid> {
        self.dispatch(LedgerAction::AddCategory(category))
            .map(|outcome| outcome.id())
    }

    pub fn update_category(&mut self, category: Category) -> Result<()> {
        self.dispatch(LedgerAction::UpdateCategory(category))
            .map(|_| ())
    }

    pub fn remove_category(&mut self, id: Uuid) -> Result<()> {
        self.dispatch(LedgerAction::RemoveCategory(id)).map(|_| ())
    }

    pub fn add_savings_goal(&mut self, goal: SavingsGoal) -> Result<Uuid> {
        self.dispatch(LedgerAction::AddSavingsGoal(goal))
            .map(|outcome| outcome.id())
    }

    pub fn update_savings_goal(&mut self, goal: SavingsGoal) -> Result<()> {
        self.dispatch(LedgerAction::UpdateSavingsGoal(goal))
            .map(|_| ())
    }

    pub fn remove_savings_goal(&mut self, id: Uuid) -> Result<()> {
        self.dispatch(LedgerAction::RemoveSavingsGoal(id)).map(|_| ())
    }

    /// Returns the goal's new balance.
    pub fn contribute_to_goal(&mut self, id: Uuid, amount: f64) -> Result<f64> {
        self.dispatch(LedgerAction::ContributeToGoal { id, amount })?;
        self.ledger
            .goal(id)
            .map(|goal| goal.current_amount)
            .ok_or_else(|| FinanceError::not_found(EntityKind::SavingsGoal, id))
    }

    pub fn category_totals(&self, entry_type: EntryType) -> Vec<CategoryTotal> {
        SummaryService::category_totals(
            &self.ledger.transactions,
            &self.ledger.categories,
            entry_type,
        )
    }

    pub fn monthly_series(&self, month_count: usize) -> Vec<MonthlyAggregate> {
        SummaryService::monthly_series(&self.ledger.transactions, month_count, self.today())
    }

    pub fn budget_progress(&self) -> Vec<BudgetProgress> {
        BudgetService::budget_progress(&self.ledger)
    }

    pub fn category_activity(&self, entry_type: EntryType) -> Vec<CategoryActivity> {
        CategoryService::activity(&self.ledger, entry_type)
    }

    pub fn goal_progress(&self) -> Vec<GoalProgress> {
        BudgetService::goal_summaries(&self.ledger.goals, self.today(), None)
    }

    pub fn transactions(&self, filter: &TransactionFilter) -> Vec<&Transaction> {
        TransactionService::filter(&self.ledger, filter)
    }

    pub fn dashboard(&self, options: DashboardOptions) -> DashboardSnapshot {
        SummaryService::dashboard(&self.ledger, self.today(), options)
    }
}

impl Default for BudgetStore {
    fn default() -> Self {
        Self::new(Ledger::new())
    }
}

impl fmt::Debug for BudgetStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BudgetStore")
            .field("revision", &self.revision)
            .field("transactions", &self.ledger.transactions.len())
            .field("categories", &self.ledger.categories.len())
            .field("goals", &self.ledger.goals.len())
            .finish()
    }
}
