//! Enumeration types for constrained domain values.
//!
//! The source data represents recurrence rules and transaction kinds as
//! free-form strings compared by value; they are modeled here as closed
//! tagged variants so that invalid-string states cannot be constructed.

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Recurrence rule of a fixed expense.
///
/// Serialized as the lowercase strings the dashboard persists
/// (`"daily"`, `"biweekly"`, `"semiannually"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    /// Every day.
    Daily,
    /// Every 7 days.
    Weekly,
    /// Every 14 days.
    Biweekly,
    /// Every calendar month.
    Monthly,
    /// Every 2 calendar months.
    Bimonthly,
    /// Every 3 calendar months.
    Quarterly,
    /// Every 6 calendar months.
    Semiannually,
    /// Every calendar year.
    Annually,
}

impl Recurrence {
    /// Returns the `n`-th occurrence of this rule (0-based) for a series
    /// starting at `start`.
    ///
    /// Month-based rules step in whole calendar months from `start`
    /// rather than from the previous occurrence, so a series anchored on
    /// Jan 31 yields Feb 28 (clamped) and then Mar 31 — no end-of-month
    /// drift. Returns `None` if the date arithmetic overflows.
    #[inline]
    #[must_use]
    pub fn nth_occurrence(self, start: NaiveDate, n: u32) -> Option<NaiveDate> {
        match self {
            Self::Daily => start.checked_add_days(Days::new(u64::from(n))),
            Self::Weekly => start.checked_add_days(Days::new(u64::from(n) * 7)),
            Self::Biweekly => start.checked_add_days(Days::new(u64::from(n) * 14)),
            Self::Monthly => add_months(start, n, 1),
            Self::Bimonthly => add_months(start, n, 2),
            Self::Quarterly => add_months(start, n, 3),
            Self::Semiannually => add_months(start, n, 6),
            Self::Annually => add_months(start, n, 12),
        }
    }

    /// Enumerates the occurrences of a series starting at `start` that
    /// fall within `[from, to]` (both bounds inclusive).
    ///
    /// Occurrences are generated in ascending order. A series whose
    /// `start` lies beyond `to` yields nothing.
    #[must_use]
    pub fn occurrences_between(self, start: NaiveDate, from: NaiveDate, to: NaiveDate) -> Vec<NaiveDate> {
        let mut occurrences = Vec::new();
        let mut n = 0_u32;
        loop {
            let Some(date) = self.nth_occurrence(start, n) else {
                break;
            };
            if date > to {
                break;
            }
            if date >= from {
                occurrences.push(date);
            }
            let Some(next) = n.checked_add(1) else {
                break;
            };
            n = next;
        }
        occurrences
    }
}

/// Steps `start` forward by `n * step_months` calendar months.
fn add_months(start: NaiveDate, n: u32, step_months: u32) -> Option<NaiveDate> {
    let months = n.checked_mul(step_months)?;
    start.checked_add_months(Months::new(months))
}

/// Kind of a transaction category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    /// Money coming into an account.
    Income,
    /// Money leaving an account.
    Expense,
}

/// Kind of a statement or forecast entry, as seen from one account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// A recorded or projected income.
    Income,
    /// A recorded or projected expense.
    Expense,
    /// The receiving side of a transfer.
    TransferIn,
    /// The sending side of a transfer.
    TransferOut,
}

impl EntryKind {
    /// Returns `true` if entries of this kind add to the account balance.
    #[inline]
    #[must_use]
    pub const fn is_credit(self) -> bool {
        matches!(self, Self::Income | Self::TransferIn)
    }
}
