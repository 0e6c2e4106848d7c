//! Fixed recurring expense model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AccountId, FixedExpenseId, Recurrence};

/// A recurring obligation (rent, subscription, utility bill).
///
/// Fixed expenses are never stored as discrete transactions; the
/// forecast materializes their occurrences into synthetic projected
/// entries on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedExpense {
    /// Unique identifier (UUID, generated by the UI at form submission).
    pub id: FixedExpenseId,
    /// Account the obligation is paid from.
    pub account_id: AccountId,
    /// Free-text description.
    pub description: String,
    /// Category name, matched by value.
    pub category: String,
    /// Positive amount charged per occurrence.
    pub amount: Decimal,
    /// Recurrence rule.
    pub recurrence: Recurrence,
    /// First occurrence date.
    pub start_date: NaiveDate,
    /// Last occurrence date (inclusive); `None` means open-ended.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl FixedExpense {
    /// Enumerates this expense's occurrence dates within `[from, to]`
    /// (inclusive), honoring `start_date` and the optional `end_date`.
    #[must_use]
    pub fn occurrences_between(&self, from: NaiveDate, to: NaiveDate) -> Vec<NaiveDate> {
        let upper = self.end_date.map_or(to, |end| end.min(to));
        if upper < from {
            return Vec::new();
        }
        self.recurrence.occurrences_between(self.start_date, from, upper)
    }
}
