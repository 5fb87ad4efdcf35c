//! Savings goal management and contributions.

use uuid::Uuid;

use crate::core::services::ServiceResult;
use crate::domain::SavingsGoal;
use crate::errors::{ensure_non_negative, ensure_positive, EntityKind, FinanceError};
use crate::ledger::Ledger;

pub struct GoalService;

impl GoalService {
    /// Appends the goal under a fresh identifier. A zero target is rejected so
    /// progress is always defined.
    pub fn add(ledger: &mut Ledger, mut goal: SavingsGoal) -> ServiceResult<Uuid> {
        Self::validate(&goal)?;
        goal.id = Uuid::new_v4();
        Ok(ledger.push_goal(goal))
    }

    pub fn update(ledger: &mut Ledger, goal: SavingsGoal) -> ServiceResult<()> {
        Self::validate(&goal)?;
        let slot = ledger
            .goal_mut(goal.id)
            .ok_or_else(|| FinanceError::not_found(EntityKind::SavingsGoal, goal.id))?;
        *slot = goal;
        Ok(())
    }

    pub fn remove(ledger: &mut Ledger, id: Uuid) -> ServiceResult<SavingsGoal> {
        let index = ledger
            .goals
            .iter()
            .position(|goal| goal.id == id)
            .ok_or_else(|| FinanceError::not_found(EntityKind::SavingsGoal, id))?;
        Ok(ledger.goals.remove(index))
    }

    /// Adds `amount` to the goal's balance and returns the new balance. The
    /// stored balance may exceed the target; only reported progress saturates.
    pub fn contribute(ledger: &mut Ledger, id: Uuid, amount: f64) -> ServiceResult<f64> {
        ensure_positive(amount, "contribution")?;
        let goal = ledger
            .goal_mut(id)
            .ok_or_else(|| FinanceError::not_found(EntityKind::SavingsGoal, id))?;
        let balance = goal.current_amount + amount;
        if !balance.is_finite() {
            return Err(FinanceError::InvalidAmount(format!(
                "contribution of {amount} overflows the goal balance"
            )));
        }
        goal.current_amount = balance;
        Ok(balance)
    }

    fn validate(goal: &SavingsGoal) -> ServiceResult<()> {
        ensure_positive(goal.target_amount, "goal target")?;
        ensure_non_negative(goal.current_amount, "goal balance")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn goal(target: f64, current: f64) -> SavingsGoal {
        let deadline = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        SavingsGoal::new("Emergency Fund", target, deadline).with_current(current)
    }

    #[test]
    fn zero_target_is_rejected_at_creation() {
        let mut ledger = Ledger::new();
        let err = GoalService::add(&mut ledger, goal(0.0, 0.0)).expect_err("zero target");
        assert!(matches!(err, FinanceError::InvalidAmount(_)), "unexpected error: {err:?}");
        assert!(ledger.goals.is_empty());
    }

    #[test]
    fn contribute_increments_balance_without_clamping() {
        let mut ledger = Ledger::new();
        let id = GoalService::add(&mut ledger, goal(1000.0, 950.0)).unwrap();

        let balance = GoalService::contribute(&mut ledger, id, 100.0).unwrap();

        assert_eq!(balance, 1050.0);
        assert_eq!(ledger.goal(id).map(|g| g.current_amount), Some(1050.0));
    }

    #[test]
    fn contribute_rejects_non_positive_amounts() {
        let mut ledger = Ledger::new();
        let id = GoalService::add(&mut ledger, goal(1000.0, 0.0)).unwrap();

        for amount in [0.0, -5.0, f64::NAN] {
            let err = GoalService::contribute(&mut ledger, id, amount).expect_err("invalid");
            assert!(matches!(err, FinanceError::InvalidAmount(_)), "unexpected error: {err:?}");
        }
        assert_eq!(ledger.goal(id).map(|g| g.current_amount), Some(0.0));
    }

    #[test]
    fn contribute_refuses_balances_that_overflow() {
        let mut ledger = Ledger::new();
        let id = GoalService::add(&mut ledger, goal(f64::MAX, 0.0)).unwrap();

        assert_eq!(GoalService::contribute(&mut ledger, id, f64::MAX), Ok(f64::MAX));
        let err = GoalService::contribute(&mut ledger, id, f64::MAX).expect_err("overflow");

        assert!(matches!(err, FinanceError::InvalidAmount(_)), "unexpected error: {err:?}");
        assert_eq!(ledger.goal(id).map(|g| g.current_amount), Some(f64::MAX));
    }

    #[test]
    fn contribute_to_unknown_goal_is_not_found() {
        let mut ledger = Ledger::new();
        let missing = Uuid::new_v4();
        let err = GoalService::contribute(&mut ledger, missing, 10.0).expect_err("missing");
        assert_eq!(err, FinanceError::not_found(EntityKind::SavingsGoal, missing));
    }

    #[test]
    fn update_and_remove_by_id() {
        let mut ledger = Ledger::new();
        let id = GoalService::add(&mut ledger, goal(500.0, 10.0)).unwrap();

        let mut changed = ledger.goal(id).cloned().unwrap();
        changed.name = "Rainy Day".into();
        GoalService::update(&mut ledger, changed).unwrap();
        assert_eq!(ledger.goals[0].name, "Rainy Day");

        GoalService::remove(&mut ledger, id).unwrap();
        assert!(ledger.goal(id).is_none());
    }
}
