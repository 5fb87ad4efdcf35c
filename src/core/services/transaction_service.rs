//! Business logic helpers for managing transactions.

use uuid::Uuid;

use crate::core::services::ServiceResult;
use crate::domain::{EntryType, Transaction};
use crate::errors::{ensure_non_negative, EntityKind, FinanceError};
use crate::ledger::Ledger;

/// Provides validated CRUD helpers for ledger transactions.
pub struct TransactionService;

impl TransactionService {
    /// Appends the transaction under a freshly generated identifier and returns it.
    pub fn add(ledger: &mut Ledger, mut transaction: Transaction) -> ServiceResult<Uuid> {
        ensure_non_negative(transaction.amount, "transaction amount")?;
        transaction.id = Uuid::new_v4();
        Ok(ledger.push_transaction(transaction))
    }

    /// Replaces the stored transaction that shares `transaction.id`.
    pub fn update(ledger: &mut Ledger, transaction: Transaction) -> ServiceResult<()> {
        ensure_non_negative(transaction.amount, "transaction amount")?;
        let slot = ledger
            .transaction_mut(transaction.id)
            .ok_or_else(|| FinanceError::not_found(EntityKind::Transaction, transaction.id))?;
        *slot = transaction;
        Ok(())
    }

    /// Removes the transaction identified by `id`, returning the removed instance.
    pub fn remove(ledger: &mut Ledger, id: Uuid) -> ServiceResult<Transaction> {
        let index = ledger
            .transactions
            .iter()
            .position(|txn| txn.id == id)
            .ok_or_else(|| FinanceError::not_found(EntityKind::Transaction, id))?;
        Ok(ledger.transactions.remove(index))
    }

    /// Applies the type filter and free-text search, keeping ledger order.
    pub fn filter<'a>(ledger: &'a Ledger, filter: &TransactionFilter) -> Vec<&'a Transaction> {
        ledger
            .transactions
            .iter()
            .filter(|txn| filter.matches(ledger, txn))
            .collect()
    }
}

/// Narrowing options for transaction listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    pub entry_type: Option<EntryType>,
    pub search: Option<String>,
}

impl TransactionFilter {
    pub fn of_type(entry_type: EntryType) -> Self {
        Self {
            entry_type: Some(entry_type),
            search: None,
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Type must match when set; the search term is matched case-insensitively
    /// against the description and the category name.
    pub fn matches(&self, ledger: &Ledger, transaction: &Transaction) -> bool {
        if let Some(kind) = self.entry_type {
            if transaction.entry_type != kind {
                return false;
            }
        }
        let Some(term) = self.search.as_deref() else {
            return true;
        };
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        let category = ledger
            .category_name(transaction.category_id)
            .unwrap_or_default()
            .to_lowercase();
        transaction.description.to_lowercase().contains(&needle) || category.contains(&needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn add_assigns_a_fresh_identifier() {
        let mut ledger = Ledger::new();
        let txn = Transaction::expense(42.0, Uuid::new_v4(), date());
        let original = txn.id;

        let id = TransactionService::add(&mut ledger, txn).unwrap();

        assert_ne!(id, original);
        assert_eq!(ledger.transaction(id).map(|t| t.amount), Some(42.0));
    }

    #[test]
    fn add_rejects_negative_amounts() {
        let mut ledger = Ledger::new();
        let txn = Transaction::expense(-1.0, Uuid::new_v4(), date());
        let err = TransactionService::add(&mut ledger, txn).expect_err("negative amount");
        assert!(matches!(err, FinanceError::InvalidAmount(_)), "unexpected error: {err:?}");
        assert!(ledger.transactions.is_empty());
    }

    #[test]
    fn update_fails_for_missing_transaction() {
        let mut ledger = Ledger::new();
        let txn = Transaction::expense(1.0, Uuid::new_v4(), date());
        let err = TransactionService::update(&mut ledger, txn.clone())
            .expect_err("update must fail for unknown id");
        assert_eq!(err, FinanceError::not_found(EntityKind::Transaction, txn.id));
    }

    #[test]
    fn update_replaces_the_whole_record() {
        let mut ledger = Ledger::new();
        let id = TransactionService::add(
            &mut ledger,
            Transaction::expense(10.0, Uuid::new_v4(), date()).with_description("Coffee"),
        )
        .unwrap();

        let mut changed = ledger.transaction(id).cloned().unwrap();
        changed.amount = 12.5;
        changed.description = "Coffee beans".into();
        TransactionService::update(&mut ledger, changed).unwrap();

        let stored = ledger.transaction(id).unwrap();
        assert_eq!(stored.amount, 12.5);
        assert_eq!(stored.description, "Coffee beans");
        assert_eq!(ledger.transactions.len(), 1);
    }

    #[test]
    fn remove_returns_deleted_transaction() {
        let mut ledger = Ledger::new();
        let id = TransactionService::add(
            &mut ledger,
            Transaction::income(5.0, Uuid::new_v4(), date()),
        )
        .unwrap();

        let removed = TransactionService::remove(&mut ledger, id).unwrap();
        assert_eq!(removed.id, id);
        assert!(ledger.transactions.is_empty());
        assert!(TransactionService::remove(&mut ledger, id).is_err());
    }

    #[test]
    fn filter_searches_description_and_category_name() {
        let mut ledger = Ledger::new();
        let groceries = ledger.push_category(Category::expense("Groceries", 300.0));
        let salary = ledger.push_category(Category::income("Salary"));
        ledger.push_transaction(
            Transaction::expense(80.0, groceries, date()).with_description("Market run"),
        );
        ledger.push_transaction(
            Transaction::income(3000.0, salary, date()).with_description("Monthly pay"),
        );

        let by_category = TransactionFilter::default().with_search("GROC");
        assert_eq!(TransactionService::filter(&ledger, &by_category).len(), 1);

        let by_description = TransactionFilter::default().with_search("monthly");
        assert_eq!(TransactionService::filter(&ledger, &by_description).len(), 1);

        let expenses = TransactionFilter::of_type(EntryType::Expense).with_search("pay");
        assert!(TransactionService::filter(&ledger, &expenses).is_empty());

        let blank = TransactionFilter::default().with_search("   ");
        assert_eq!(TransactionService::filter(&ledger, &blank).len(), 2);
    }
}
