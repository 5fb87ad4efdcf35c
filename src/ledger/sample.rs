//! Fixed demo data used to seed a fresh tracker.

use chrono::NaiveDate;

use crate::domain::{Category, SavingsGoal, Transaction};
use crate::ledger::Ledger;

impl Ledger {
    /// Demo state: five categories, three transactions dated `today`, and two
    /// savings goals.
    pub fn sample(today: NaiveDate) -> Self {
        let mut ledger = Ledger::new();

        let salary = ledger.push_category(Category::income("Salary").with_color("#10B981"));
        let rent = ledger.push_category(Category::expense("Rent", 500.0).with_color("#EF4444"));
        let groceries =
            ledger.push_category(Category::expense("Groceries", 300.0).with_color("#F59E0B"));
        ledger.push_category(Category::expense("Utilities", 150.0).with_color("#3B82F6"));
        ledger.push_category(Category::expense("Entertainment", 100.0).with_color("#8B5CF6"));

        ledger.push_transaction(
            Transaction::income(3000.0, salary, today).with_description("Monthly salary"),
        );
        ledger.push_transaction(
            Transaction::expense(500.0, rent, today).with_description("Monthly rent"),
        );
        ledger.push_transaction(
            Transaction::expense(100.0, groceries, today).with_description("Weekly groceries"),
        );

        if let Some(deadline) = NaiveDate::from_ymd_opt(2024, 12, 31) {
            ledger.push_goal(
                SavingsGoal::new("Emergency Fund", 10000.0, deadline)
                    .with_current(2500.0)
                    .with_color("#10B981"),
            );
        }
        if let Some(deadline) = NaiveDate::from_ymd_opt(2024, 8, 31) {
            ledger.push_goal(
                SavingsGoal::new("Vacation", 2000.0, deadline)
                    .with_current(500.0)
                    .with_color("#3B82F6"),
            );
        }

        ledger
    }
}
