//! Income/expense transaction model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AccountId, TransactionId};

/// A single income or expense transaction.
///
/// The same shape backs both the `income` and `expenses` collections of
/// the snapshot; whether the amount credits or debits the account is
/// decided by which collection holds the record. `amount` is always a
/// positive magnitude.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier (UUID, generated by the UI at form submission).
    pub id: TransactionId,
    /// Owning account.
    pub account_id: AccountId,
    /// Free-text description.
    pub description: String,
    /// Category name, matched by value against [`super::Category`].
    pub category: String,
    /// Positive amount; the sign is applied by context.
    pub amount: Decimal,
    /// Calendar date (no time component is modeled).
    pub date: NaiveDate,
}
