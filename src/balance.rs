//! Account balance calculator.
//!
//! Derives every account's current balance from the append-only
//! transaction log. Balances are never maintained incrementally: the
//! whole derivation reruns on each snapshot mutation, which keeps the
//! displayed balance consistent with the ledger by construction.

use std::collections::HashSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{Account, AccountId, Snapshot};

/// Computes the current balance of every account in the snapshot.
///
/// For each account:
///
/// ```text
/// current = initial
///         + Σ incomes               (account matches)
///         − Σ expenses              (account matches)
///         − Σ transfer.from_amount  (account is source)
///         + Σ transfer.to_amount    (account is destination)
/// ```
///
/// Only transactions dated on/after the account's `balance_date`
/// participate; earlier ones are assumed folded into the stored initial
/// balance. Transactions referencing an unknown account are excluded
/// from every sum (and reported at warn level) — the calculator stays
/// resilient to inconsistent imported data rather than failing.
///
/// Pure: deterministic for a given snapshot, no side inputs, every
/// field other than `current_balance` passes through unchanged.
#[must_use]
pub fn compute_account_balances(snapshot: &Snapshot) -> Vec<Account> {
    warn_on_orphans(snapshot);
    snapshot
        .accounts
        .iter()
        .map(|account| {
            let mut computed = account.clone();
            computed.current_balance = balance_up_to(snapshot, account, None);
            computed
        })
        .collect()
}

/// Computes one account's balance counting only transactions dated in
/// `[balance_date, as_of]`.
///
/// Returns `None` when the account is unknown. This is the forecast's
/// starting point: future-dated recorded transactions are excluded here
/// and re-applied by the projection walk instead.
#[inline]
#[must_use]
pub fn balance_as_of(snapshot: &Snapshot, id: AccountId, as_of: NaiveDate) -> Option<Decimal> {
    snapshot
        .account(id)
        .map(|account| balance_up_to(snapshot, account, Some(as_of)))
}

/// Sums one account's deltas over `[balance_date, upper]` (`upper = None`
/// means unbounded above).
fn balance_up_to(snapshot: &Snapshot, account: &Account, upper: Option<NaiveDate>) -> Decimal {
    let in_window =
        |date: NaiveDate| date >= account.balance_date && upper.is_none_or(|bound| date <= bound);

    let income: Decimal = snapshot
        .incomes
        .iter()
        .filter(|tx| tx.account_id == account.id && in_window(tx.date))
        .map(|tx| tx.amount)
        .sum();
    let spent: Decimal = snapshot
        .expenses
        .iter()
        .filter(|tx| tx.account_id == account.id && in_window(tx.date))
        .map(|tx| tx.amount)
        .sum();
    let sent: Decimal = snapshot
        .transfers
        .iter()
        .filter(|transfer| transfer.from_id == account.id && in_window(transfer.date))
        .map(|transfer| transfer.from_amount)
        .sum();
    let received: Decimal = snapshot
        .transfers
        .iter()
        .filter(|transfer| transfer.to_id == account.id && in_window(transfer.date))
        .map(|transfer| transfer.to_amount)
        .sum();

    account.initial_balance + income - spent - sent + received
}

/// Reports transactions referencing accounts the snapshot does not hold.
fn warn_on_orphans(snapshot: &Snapshot) {
    let known: HashSet<AccountId> = snapshot.accounts.iter().map(|account| account.id).collect();
    for tx in snapshot.incomes.iter().chain(&snapshot.expenses) {
        if !known.contains(&tx.account_id) {
            tracing::warn!(
                transaction = %tx.id,
                account = %tx.account_id,
                "orphaned transaction excluded from balances"
            );
        }
    }
    for transfer in &snapshot.transfers {
        if !known.contains(&transfer.from_id) || !known.contains(&transfer.to_id) {
            tracing::warn!(transfer = %transfer.id, "transfer references unknown account");
        }
    }
}
