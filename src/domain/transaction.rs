//! Domain model for dated money movements.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

/// A single income or expense entry. `amount` is always stored positive; the
/// direction comes from `entry_type`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub amount: f64,
    pub category_id: Uuid,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
    pub entry_type: EntryType,
}

impl Transaction {
    pub fn new(entry_type: EntryType, amount: f64, category_id: Uuid, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            category_id,
            description: String::new(),
            date,
            entry_type,
        }
    }

    pub fn income(amount: f64, category_id: Uuid, date: NaiveDate) -> Self {
        Self::new(EntryType::Income, amount, category_id, date)
    }

    pub fn expense(amount: f64, category_id: Uuid, date: NaiveDate) -> Self {
        Self::new(EntryType::Expense, amount, category_id, date)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn is_income(&self) -> bool {
        self.entry_type == EntryType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.entry_type == EntryType::Expense
    }

    /// Amount with the sign implied by the entry type.
    pub fn signed_amount(&self) -> f64 {
        self.amount * self.entry_type.sign()
    }

    /// Calendar-month membership, by year and month equality.
    pub fn falls_in_month(&self, year: i32, month: u32) -> bool {
        self.date.year() == year && self.date.month() == month
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl BelongsToCategory for Transaction {
    fn category_id(&self) -> Uuid {
        self.category_id
    }
}

impl Amounted for Transaction {
    fn amount(&self) -> f64 {
        self.amount
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        let sign = if self.is_income() { '+' } else { '-' };
        format!("{} {} {:.2}", self.date, sign, self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn signed_amount_follows_entry_type() {
        let category = Uuid::new_v4();
        assert_eq!(Transaction::income(40.0, category, date(2024, 3, 1)).signed_amount(), 40.0);
        assert_eq!(Transaction::expense(40.0, category, date(2024, 3, 1)).signed_amount(), -40.0);
    }

    #[test]
    fn month_membership_uses_calendar_month() {
        let txn = Transaction::expense(10.0, Uuid::new_v4(), date(2024, 1, 31));
        assert!(txn.falls_in_month(2024, 1));
        assert!(!txn.falls_in_month(2024, 2));
        assert!(!txn.falls_in_month(2023, 1));
    }
}
