use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    BelongsToCategory, Category, EntryType, Identifiable, NamedEntity, SavingsGoal, Transaction,
};

/// One immutable-by-convention state of the tracker. Mutations go through the
/// services, which validate before touching any collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Ledger {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub goals: Vec<SavingsGoal>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_transaction(&mut self, transaction: Transaction) -> Uuid {
        let id = transaction.id;
        self.transactions.push(transaction);
        id
    }

    pub fn push_category(&mut self, category: Category) -> Uuid {
        let id = category.id;
        self.categories.push(category);
        id
    }

    pub fn push_goal(&mut self, goal: SavingsGoal) -> Uuid {
        let id = goal.id;
        self.goals.push(goal);
        id
    }

    pub fn transaction(&self, id: Uuid) -> Option<&Transaction> {
        find_by_id(&self.transactions, id)
    }

    pub fn transaction_mut(&mut self, id: Uuid) -> Option<&mut Transaction> {
        find_by_id_mut(&mut self.transactions, id)
    }

    pub fn category(&self, id: Uuid) -> Option<&Category> {
        find_by_id(&self.categories, id)
    }

    pub fn category_mut(&mut self, id: Uuid) -> Option<&mut Category> {
        find_by_id_mut(&mut self.categories, id)
    }

    /// Case-insensitive lookup, optionally restricted to one entry type.
    pub fn category_by_name(&self, name: &str, entry_type: Option<EntryType>) -> Option<&Category> {
        let needle = name.trim();
        self.categories.iter().find(|category| {
            name_matches(*category, needle)
                && entry_type.map_or(true, |kind| category.entry_type == kind)
        })
    }

    pub fn categories_of(&self, entry_type: EntryType) -> impl Iterator<Item = &Category> + '_ {
        self.categories
            .iter()
            .filter(move |category| category.entry_type == entry_type)
    }

    pub fn goal(&self, id: Uuid) -> Option<&SavingsGoal> {
        find_by_id(&self.goals, id)
    }

    pub fn goal_mut(&mut self, id: Uuid) -> Option<&mut SavingsGoal> {
        find_by_id_mut(&mut self.goals, id)
    }

    pub fn goal_by_name(&self, name: &str) -> Option<&SavingsGoal> {
        let needle = name.trim();
        self.goals.iter().find(|goal| name_matches(*goal, needle))
    }

    /// Number of transactions booked against the category.
    pub fn references_to(&self, category_id: Uuid) -> usize {
        self.transactions
            .iter()
            .filter(|txn| txn.category_id() == category_id)
            .count()
    }

    /// Display name for a transaction's category, if it still exists.
    pub fn category_name(&self, category_id: Uuid) -> Option<&str> {
        self.category(category_id).map(|category| category.name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty() && self.categories.is_empty() && self.goals.is_empty()
    }
}

fn find_by_id<T: Identifiable>(items: &[T], id: Uuid) -> Option<&T> {
    items.iter().find(|item| item.id() == id)
}

fn find_by_id_mut<T: Identifiable>(items: &mut [T], id: Uuid) -> Option<&mut T> {
    items.iter_mut().find(|item| item.id() == id)
}

fn name_matches<T: NamedEntity>(item: &T, needle: &str) -> bool {
    item.name().eq_ignore_ascii_case(needle)
}
