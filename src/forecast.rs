//! Future balance projection.
//!
//! Projects an account's balance forward over a bounded window by
//! merging recorded future-dated transactions with synthetic
//! occurrences materialized from fixed recurring expenses, then walking
//! the merged sequence accumulating a running balance.
//!
//! The projection is a pure transformation: same snapshot, same `today`
//! and same horizon always produce the same sequence.

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::balance;
use crate::models::{AccountId, EntryKind, Snapshot, DEFAULT_CURRENCY};

/// Category label recorded on transfer entries.
const TRANSFER_CATEGORY: &str = "Transferência";

/// One row of a projection: a recorded future transaction or a
/// materialized fixed-expense occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Calendar date of the entry.
    pub date: NaiveDate,
    /// Human-readable description.
    pub description: String,
    /// Category name (transfers use a fixed label).
    pub category: String,
    /// How the entry affects the account.
    pub kind: EntryKind,
    /// Positive magnitude; the sign follows `kind`.
    pub amount: Decimal,
    /// `true` for entries synthesized from a recurrence rule, `false`
    /// for recorded transactions.
    pub projected: bool,
    /// Running balance *after* applying this entry.
    pub balance: Decimal,
}

/// Result of a projection over one account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    /// Date-ascending entries, each carrying the running balance after
    /// itself.
    pub entries: Vec<ForecastEntry>,
    /// Date of the first entry whose running balance dips below zero.
    pub first_negative: Option<NaiveDate>,
    /// Currency of the projected account ([`DEFAULT_CURRENCY`] when the
    /// account is unknown).
    pub currency: String,
}

impl Forecast {
    /// An empty projection in the given currency.
    fn empty(currency: &str) -> Self {
        Self {
            entries: Vec::new(),
            first_negative: None,
            currency: currency.to_owned(),
        }
    }
}

/// Projects the account's balance over `(today, today + horizon_days]`.
///
/// The walk starts from the account balance as of `today` (future-dated
/// recorded transactions are excluded from the starting point and
/// re-applied in date order instead), then accumulates:
///
/// - recorded incomes (+) and expenses (−) dated inside the window,
/// - transfer-out (− `from_amount`) and transfer-in (+ `to_amount`),
/// - one synthetic expense per fixed-expense occurrence inside the
///   window (`projected = true`).
///
/// Entries are sorted date-ascending; same-date entries keep a stable
/// collection order (incomes, expenses, transfers out, transfers in,
/// projected). An unknown account or a zero horizon yields an empty
/// projection.
#[must_use]
pub fn project(
    snapshot: &Snapshot,
    account_id: AccountId,
    horizon_days: u32,
    today: NaiveDate,
) -> Forecast {
    let Some(account) = snapshot.account(account_id) else {
        tracing::debug!(account = %account_id, "forecast for unknown account");
        return Forecast::empty(DEFAULT_CURRENCY);
    };
    let Some(window_end) = today.checked_add_days(Days::new(u64::from(horizon_days))) else {
        return Forecast::empty(&account.currency);
    };

    let mut entries = collect_window_entries(snapshot, account_id, today, window_end);
    entries.sort_by_key(|entry| entry.date);

    let starting =
        balance::balance_as_of(snapshot, account_id, today).unwrap_or(account.initial_balance);
    let mut running = starting;
    let mut first_negative = None;
    for entry in &mut entries {
        if entry.kind.is_credit() {
            running += entry.amount;
        } else {
            running -= entry.amount;
        }
        entry.balance = running;
        if first_negative.is_none() && running < Decimal::ZERO {
            first_negative = Some(entry.date);
        }
    }

    Forecast {
        entries,
        first_negative,
        currency: account.currency.clone(),
    }
}

/// Gathers the unsorted window entries with zeroed running balances.
fn collect_window_entries(
    snapshot: &Snapshot,
    account_id: AccountId,
    today: NaiveDate,
    window_end: NaiveDate,
) -> Vec<ForecastEntry> {
    let in_window = |date: NaiveDate| date > today && date <= window_end;
    let mut entries = Vec::new();

    for tx in snapshot
        .incomes
        .iter()
        .filter(|tx| tx.account_id == account_id && in_window(tx.date))
    {
        entries.push(ForecastEntry {
            date: tx.date,
            description: tx.description.clone(),
            category: tx.category.clone(),
            kind: EntryKind::Income,
            amount: tx.amount,
            projected: false,
            balance: Decimal::ZERO,
        });
    }
    for tx in snapshot
        .expenses
        .iter()
        .filter(|tx| tx.account_id == account_id && in_window(tx.date))
    {
        entries.push(ForecastEntry {
            date: tx.date,
            description: tx.description.clone(),
            category: tx.category.clone(),
            kind: EntryKind::Expense,
            amount: tx.amount,
            projected: false,
            balance: Decimal::ZERO,
        });
    }
    for transfer in snapshot
        .transfers
        .iter()
        .filter(|transfer| transfer.from_id == account_id && in_window(transfer.date))
    {
        entries.push(ForecastEntry {
            date: transfer.date,
            description: transfer_label(snapshot, transfer.description.as_deref(), transfer.to_id, "para"),
            category: TRANSFER_CATEGORY.to_owned(),
            kind: EntryKind::TransferOut,
            amount: transfer.from_amount,
            projected: false,
            balance: Decimal::ZERO,
        });
    }
    for transfer in snapshot
        .transfers
        .iter()
        .filter(|transfer| transfer.to_id == account_id && in_window(transfer.date))
    {
        entries.push(ForecastEntry {
            date: transfer.date,
            description: transfer_label(snapshot, transfer.description.as_deref(), transfer.from_id, "de"),
            category: TRANSFER_CATEGORY.to_owned(),
            kind: EntryKind::TransferIn,
            amount: transfer.to_amount,
            projected: false,
            balance: Decimal::ZERO,
        });
    }

    // Materialize fixed-expense occurrences strictly after today.
    let Some(window_start) = today.checked_add_days(Days::new(1)) else {
        return entries;
    };
    for fixed in snapshot
        .fixed_expenses
        .iter()
        .filter(|fixed| fixed.account_id == account_id)
    {
        for occurrence in fixed.occurrences_between(window_start, window_end) {
            entries.push(ForecastEntry {
                date: occurrence,
                description: fixed.description.clone(),
                category: fixed.category.clone(),
                kind: EntryKind::Expense,
                amount: fixed.amount,
                projected: true,
                balance: Decimal::ZERO,
            });
        }
    }
    entries
}

/// Builds a transfer entry label: the recorded description, or a
/// counterparty reference when none was given.
fn transfer_label(
    snapshot: &Snapshot,
    description: Option<&str>,
    counterparty: AccountId,
    direction: &str,
) -> String {
    description.map_or_else(
        || {
            let name = snapshot
                .account(counterparty)
                .map_or("conta desconhecida", |account| account.name.as_str());
            format!("Transferência {direction} {name}")
        },
        str::to_owned,
    )
}

/// Suggests a same-currency account able to cover the projection's worst
/// shortfall while keeping its own minimum balance.
///
/// Returns `None` when the forecast never goes negative, the projected
/// account is unknown, or no account qualifies.
#[must_use]
pub fn suggest_covering_account(
    snapshot: &Snapshot,
    forecast: &Forecast,
    account_id: AccountId,
) -> Option<AccountId> {
    if forecast.first_negative.is_none() {
        return None;
    }
    let target = snapshot.account(account_id)?;
    let worst = forecast
        .entries
        .iter()
        .map(|entry| entry.balance)
        .min()
        .unwrap_or(Decimal::ZERO);
    let shortfall = -worst.min(Decimal::ZERO);
    snapshot
        .accounts
        .iter()
        .find(|candidate| {
            candidate.id != target.id
                && candidate.currency == target.currency
                && candidate.current_balance >= shortfall + candidate.min_balance
        })
        .map(|candidate| candidate.id)
}
