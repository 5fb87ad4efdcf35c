#![allow(dead_code)]

use budget_tracker::{
    core::time::FixedClock,
    domain::{Category, SavingsGoal, Transaction},
    ledger::Ledger,
    BudgetStore,
};
use chrono::NaiveDate;
use uuid::Uuid;

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

/// Fixed "today" shared by the integration suites.
pub fn today() -> NaiveDate {
    date(2024, 6, 15)
}

/// Ids of the categories seeded by [`household_ledger`].
pub struct Household {
    pub ledger: Ledger,
    pub salary: Uuid,
    pub rent: Uuid,
    pub groceries: Uuid,
    pub fun: Uuid,
}

/// Three months of activity: salary every month, rent every month, groceries
/// twice, and one unused entertainment budget.
pub fn household_ledger() -> Household {
    let mut ledger = Ledger::new();
    let salary = ledger.push_category(Category::income("Salary").with_color("#10B981"));
    let rent = ledger.push_category(Category::expense("Rent", 500.0).with_color("#EF4444"));
    let groceries = ledger.push_category(Category::expense("Groceries", 300.0));
    let fun = ledger.push_category(Category::expense("Entertainment", 100.0));

    for month in 4..=6 {
        ledger.push_transaction(
            Transaction::income(3000.0, salary, date(2024, month, 1)).with_description("Salary"),
        );
        ledger.push_transaction(
            Transaction::expense(500.0, rent, date(2024, month, 2)).with_description("Rent"),
        );
    }
    ledger.push_transaction(
        Transaction::expense(120.0, groceries, date(2024, 5, 10)).with_description("Market"),
    );
    ledger.push_transaction(
        Transaction::expense(180.0, groceries, date(2024, 6, 12)).with_description("Weekly shop"),
    );

    ledger.push_goal(
        SavingsGoal::new("Emergency Fund", 10000.0, date(2024, 12, 31)).with_current(2500.0),
    );
    ledger.push_goal(SavingsGoal::new("Vacation", 2000.0, date(2024, 8, 31)).with_current(500.0));

    Household {
        ledger,
        salary,
        rent,
        groceries,
        fun,
    }
}

pub fn household_store() -> (BudgetStore, Household) {
    let household = household_ledger();
    let store = BudgetStore::with_clock(household.ledger.clone(), Box::new(FixedClock(today())));
    (store, household)
}
