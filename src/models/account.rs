//! Bank account model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::AccountId;

/// A user's bank account.
///
/// `current_balance` is derived state: it is recomputed from the full
/// transaction history by [`crate::balance`] after every snapshot
/// mutation and is never authoritative on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier.
    pub id: AccountId,
    /// Display name.
    pub name: String,
    /// ISO 4217 currency code (e.g. `"BRL"`, `"EUR"`).
    pub currency: String,
    /// Stored balance as of [`Self::balance_date`].
    pub initial_balance: Decimal,
    /// Balance reference date. Transactions dated strictly before this
    /// date are assumed already folded into `initial_balance`.
    pub balance_date: NaiveDate,
    /// Minimum balance the owner wants to keep on the account; used by
    /// the forecast shortfall suggestion, never enforced.
    pub min_balance: Decimal,
    /// Computed current balance (derived, see type docs).
    #[serde(default)]
    pub current_balance: Decimal,
}
