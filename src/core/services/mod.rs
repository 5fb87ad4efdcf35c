pub mod budget_service;
pub mod category_service;
pub mod goal_service;
pub mod summary_service;
pub mod transaction_service;

pub use budget_service::{BudgetProgress, BudgetService, GoalProgress, ProgressStatus};
pub use category_service::{CategoryActivity, CategoryService};
pub use goal_service::GoalService;
pub use summary_service::{
    CategoryTotal, DashboardOptions, DashboardSnapshot, LedgerTotals, MonthGroup, MonthlyAggregate,
    SummaryService, DEFAULT_MONTH_COUNT,
};
pub use transaction_service::{TransactionFilter, TransactionService};

pub type ServiceResult<T> = crate::errors::Result<T>;

#[cfg(test)]
mod tests;
