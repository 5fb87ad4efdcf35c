//! Domain types representing budget categories.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

/// Categorises ledger activity for budgeting and reporting. The budget is a
/// monthly spending limit and is only meaningful for expense categories.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub budget: f64,
    pub entry_type: EntryType,
}

impl Category {
    pub fn new(name: impl Into<String>, entry_type: EntryType) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            color: DEFAULT_COLOR.to_string(),
            budget: 0.0,
            entry_type,
        }
    }

    pub fn income(name: impl Into<String>) -> Self {
        Self::new(name, EntryType::Income)
    }

    pub fn expense(name: impl Into<String>, budget: f64) -> Self {
        Self::new(name, EntryType::Expense).with_budget(budget)
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_budget(mut self, budget: f64) -> Self {
        self.budget = budget;
        self
    }

    /// Returns `true` for expense categories with a spending limit.
    pub fn has_budget(&self) -> bool {
        self.entry_type == EntryType::Expense && self.budget > 0.0
    }

    /// Budget as stored for this category's type; income never carries one.
    pub fn effective_budget(&self) -> f64 {
        match self.entry_type {
            EntryType::Expense => self.budget,
            EntryType::Income => 0.0,
        }
    }
}

impl Identifiable for Category {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Category {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Category {
    fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.entry_type)
    }
}
