//! Transfer-between-accounts model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AccountId, TransferId};

/// A transfer of funds from one account to another.
///
/// For a cross-currency transfer, `to_amount` carries the received
/// amount in the destination account's currency; the implied
/// `to_amount / from_amount` exchange rate is supplied by the caller and
/// not validated here (an unvalidated trust boundary of the source
/// system).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    /// Unique identifier (UUID, generated by the UI at form submission).
    pub id: TransferId,
    /// Source account.
    pub from_id: AccountId,
    /// Destination account. Invariant: differs from `from_id` — enforced
    /// by [`super::Snapshot::add_transfer`].
    pub to_id: AccountId,
    /// Amount debited, in the source account's currency.
    pub from_amount: Decimal,
    /// Amount credited, in the destination account's currency. Equal to
    /// `from_amount` unless the transfer crosses currencies.
    pub to_amount: Decimal,
    /// Calendar date.
    pub date: NaiveDate,
    /// Optional free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Transfer {
    /// Returns `true` if source and destination are the same account.
    #[inline]
    #[must_use]
    pub fn is_self_transfer(&self) -> bool {
        self.from_id == self.to_id
    }

    /// Returns `true` if the sent and received amounts differ, i.e. the
    /// transfer crossed currencies.
    #[inline]
    #[must_use]
    pub fn is_cross_currency(&self) -> bool {
        self.from_amount != self.to_amount
    }
}
