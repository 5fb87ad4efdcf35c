use std::fmt;
use std::result::Result as StdResult;

use thiserror::Error;
use uuid::Uuid;

/// Entity families held by the ledger, used to label lookup failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Transaction,
    Category,
    SavingsGoal,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntityKind::Transaction => "Transaction",
            EntityKind::Category => "Category",
            EntityKind::SavingsGoal => "Savings goal",
        };
        f.write_str(label)
    }
}

/// Recoverable failures raised by ledger mutations and progress calculations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FinanceError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Category `{name}` is used by {references} transaction(s)")]
    CategoryInUse { name: String, references: usize },
    #[error("{entity} not found: {id}")]
    NotFound { entity: EntityKind, id: Uuid },
}

impl FinanceError {
    pub fn not_found(entity: EntityKind, id: Uuid) -> Self {
        FinanceError::NotFound { entity, id }
    }
}

pub type Result<T> = StdResult<T, FinanceError>;

/// Accepts finite amounts strictly greater than zero.
pub fn ensure_positive(value: f64, field: &str) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(FinanceError::InvalidAmount(format!(
            "{field} must be a positive number (got {value})"
        )))
    }
}

/// Accepts finite amounts greater than or equal to zero.
pub fn ensure_non_negative(value: f64, field: &str) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(FinanceError::InvalidAmount(format!(
            "{field} must be zero or greater (got {value})"
        )))
    }
}
