//! Business logic helpers for category management.

use uuid::Uuid;

use crate::core::services::ServiceResult;
use crate::domain::{Category, EntryType, Transaction};
use crate::errors::{ensure_non_negative, EntityKind, FinanceError};
use crate::ledger::Ledger;

/// Provides validated operations for [`Category`] entities.
///
/// See also: [`crate::core::services::BudgetService`] for spend-versus-budget views.
pub struct CategoryService;

impl CategoryService {
    /// Appends the category under a fresh identifier. Income categories are
    /// stored without a budget.
    pub fn add(ledger: &mut Ledger, mut category: Category) -> ServiceResult<Uuid> {
        Self::normalize(&mut category)?;
        category.id = Uuid::new_v4();
        Ok(ledger.push_category(category))
    }

    /// Replaces the stored category that shares `category.id`. Transactions
    /// reference categories by id, so renaming keeps their history attached.
    pub fn update(ledger: &mut Ledger, mut category: Category) -> ServiceResult<()> {
        Self::normalize(&mut category)?;
        let slot = ledger
            .category_mut(category.id)
            .ok_or_else(|| FinanceError::not_found(EntityKind::Category, category.id))?;
        *slot = category;
        Ok(())
    }

    /// Removes a category after verifying no transaction is booked against it.
    pub fn remove(ledger: &mut Ledger, id: Uuid) -> ServiceResult<Category> {
        let index = ledger
            .categories
            .iter()
            .position(|category| category.id == id)
            .ok_or_else(|| FinanceError::not_found(EntityKind::Category, id))?;
        let references = ledger.references_to(id);
        if references > 0 {
            return Err(FinanceError::CategoryInUse {
                name: ledger.categories[index].name.clone(),
                references,
            });
        }
        Ok(ledger.categories.remove(index))
    }

    /// Per-category totals for one entry type: received for income, spent and
    /// remaining for expenses. Every category of the type is listed.
    pub fn activity(ledger: &Ledger, entry_type: EntryType) -> Vec<CategoryActivity> {
        ledger
            .categories_of(entry_type)
            .map(|category| CategoryActivity::measure(category, &ledger.transactions))
            .collect()
    }

    fn normalize(category: &mut Category) -> ServiceResult<()> {
        match category.entry_type {
            EntryType::Expense => {
                ensure_non_negative(category.budget, "category budget")?;
            }
            EntryType::Income => category.budget = 0.0,
        }
        Ok(())
    }
}

/// One row of the category list view.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryActivity {
    pub category_id: Uuid,
    pub name: String,
    pub color: String,
    pub entry_type: EntryType,
    pub budget: f64,
    pub total: f64,
    /// `budget - total` for expense categories; may be negative.
    pub remaining: Option<f64>,
}

impl CategoryActivity {
    fn measure(category: &Category, transactions: &[Transaction]) -> Self {
        let total: f64 = transactions
            .iter()
            .filter(|txn| txn.entry_type == category.entry_type && txn.category_id == category.id)
            .map(|txn| txn.amount)
            .sum();
        let remaining = match category.entry_type {
            EntryType::Expense => Some(category.budget - total),
            EntryType::Income => None,
        };
        Self {
            category_id: category.id,
            name: category.name.clone(),
            color: category.color.clone(),
            entry_type: category.entry_type,
            budget: category.effective_budget(),
            total,
            remaining,
        }
    }

    pub fn is_over_budget(&self) -> bool {
        self.remaining.is_some_and(|value| value < 0.0)
    }
}
