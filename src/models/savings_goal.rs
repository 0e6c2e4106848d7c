//! Savings goal model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AccountId, GoalId};

/// A savings goal funded by contributions from a target account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsGoal {
    /// Unique identifier (UUID, generated by the UI at form submission).
    pub id: GoalId,
    /// Display name.
    pub name: String,
    /// Amount the user wants to reach.
    pub target_amount: Decimal,
    /// Amount contributed so far.
    pub current_amount: Decimal,
    /// Account the goal is saved on. The persisted layout keeps the
    /// original camelCase key for this one field.
    #[serde(rename = "accountId")]
    pub account_id: AccountId,
    /// Optional self-imposed deadline.
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
}

impl SavingsGoal {
    /// Fraction of the target reached so far, in `[0, 1]` for a sane
    /// goal. A non-positive target reports `0`.
    #[inline]
    #[must_use]
    pub fn progress(&self) -> Decimal {
        if self.target_amount <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        self.current_amount / self.target_amount
    }

    /// Amount still missing to reach the target (never negative).
    #[inline]
    #[must_use]
    pub fn remaining(&self) -> Decimal {
        (self.target_amount - self.current_amount).max(Decimal::ZERO)
    }

    /// Returns `true` once contributions meet or exceed the target.
    #[inline]
    #[must_use]
    pub fn is_reached(&self) -> bool {
        self.current_amount >= self.target_amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal() -> SavingsGoal {
        SavingsGoal {
            id: GoalId::new("g-1".to_owned()),
            name: "Viagem Curta".to_owned(),
            target_amount: Decimal::from(1500),
            current_amount: Decimal::from(450),
            account_id: AccountId::new(1),
            deadline: NaiveDate::from_ymd_opt(2026, 5, 1),
        }
    }

    #[test]
    fn deserialize_goal_with_camel_case_account_key() {
        let json = r#"{
            "id": "g-1",
            "name": "Reserva de Emergência",
            "target_amount": 5000,
            "current_amount": 1100,
            "accountId": 2,
            "deadline": "2026-12-31"
        }"#;
        let parsed: SavingsGoal = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.account_id, AccountId::new(2));
        assert_eq!(parsed.current_amount, Decimal::from(1100));
    }

    #[test]
    fn progress_and_remaining() {
        let g = goal();
        assert_eq!(g.progress(), Decimal::new(3, 1)); // 450 / 1500 = 0.3
        assert_eq!(g.remaining(), Decimal::from(1050));
        assert!(!g.is_reached());
    }

    #[test]
    fn zero_target_reports_zero_progress() {
        let mut g = goal();
        g.target_amount = Decimal::ZERO;
        assert_eq!(g.progress(), Decimal::ZERO);
        assert!(g.is_reached());
    }

    #[test]
    fn overfunded_goal_clamps_remaining() {
        let mut g = goal();
        g.current_amount = Decimal::from(2000);
        assert_eq!(g.remaining(), Decimal::ZERO);
        assert!(g.is_reached());
    }

    #[test]
    fn serialize_roundtrip() {
        let g = goal();
        let json = serde_json::to_string(&g).unwrap();
        assert!(json.contains("\"accountId\":1"));
        let deserialized: SavingsGoal = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, g);
    }
}
