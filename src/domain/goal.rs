//! Savings goals: a target amount with a deadline and a running balance.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavingsGoal {
    pub id: Uuid,
    pub name: String,
    pub target_amount: f64,
    #[serde(default)]
    pub current_amount: f64,
    pub target_date: NaiveDate,
    pub color: String,
}

impl SavingsGoal {
    pub fn new(name: impl Into<String>, target_amount: f64, target_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            target_amount,
            current_amount: 0.0,
            target_date,
            color: DEFAULT_COLOR.to_string(),
        }
    }

    pub fn with_current(mut self, current_amount: f64) -> Self {
        self.current_amount = current_amount;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Amount still missing; negative once the goal is over-funded.
    pub fn remaining_amount(&self) -> f64 {
        self.target_amount - self.current_amount
    }

    pub fn is_reached(&self) -> bool {
        self.current_amount >= self.target_amount
    }

    /// Whole days until the target date, never below zero.
    pub fn days_left(&self, today: NaiveDate) -> i64 {
        (self.target_date - today).num_days().max(0)
    }
}

impl Identifiable for SavingsGoal {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for SavingsGoal {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for SavingsGoal {
    fn display_label(&self) -> String {
        format!(
            "{} ({:.2} / {:.2})",
            self.name, self.current_amount, self.target_amount
        )
    }
}
