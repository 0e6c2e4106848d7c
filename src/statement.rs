//! Consolidated per-account statement.
//!
//! Assembles the bank-statement view of one account over a calendar
//! period: every movement touching the account (incomes, expenses, both
//! transfer sides) in date order, with a running balance anchored on an
//! opening balance derived from the pre-period history.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AccountId, EntryKind, Snapshot, DEFAULT_CURRENCY};

/// Category label used for transfer rows.
const TRANSFER_CATEGORY: &str = "Transferência";

/// One statement line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementRow {
    /// Calendar date of the movement.
    pub date: NaiveDate,
    /// Description; transfer rows name the counterparty account.
    pub description: String,
    /// Category name.
    pub category: String,
    /// How the movement affects the account.
    pub kind: EntryKind,
    /// Credited amount, when the movement adds to the balance.
    pub credit: Option<Decimal>,
    /// Debited amount, when the movement subtracts from the balance.
    pub debit: Option<Decimal>,
    /// Running balance after this row.
    pub balance: Decimal,
}

/// A consolidated statement over one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    /// Date-ascending rows inside the period.
    pub rows: Vec<StatementRow>,
    /// Balance carried into the period (initial balance plus all
    /// movements dated before the period start).
    pub opening_balance: Decimal,
    /// Balance after the last row (equals the opening balance for an
    /// empty period).
    pub closing_balance: Decimal,
    /// Currency of the account.
    pub currency: String,
}

/// A movement before the credit/debit split: date ordering key plus a
/// signed amount.
struct Movement {
    /// Calendar date.
    date: NaiveDate,
    /// Row description.
    description: String,
    /// Row category.
    category: String,
    /// Movement kind.
    kind: EntryKind,
    /// Signed amount (credits positive, debits negative).
    amount: Decimal,
}

/// Builds the consolidated statement of `account_id` over
/// `[period_start, period_end]` (inclusive).
///
/// Movements dated before the account's `balance_date` are assumed
/// folded into the stored initial balance and contribute to neither the
/// opening balance nor the rows. An unknown account yields an empty
/// statement in [`DEFAULT_CURRENCY`].
#[must_use]
pub fn consolidated(
    snapshot: &Snapshot,
    account_id: AccountId,
    period_start: NaiveDate,
    period_end: NaiveDate,
) -> Statement {
    let Some(account) = snapshot.account(account_id) else {
        tracing::debug!(account = %account_id, "statement for unknown account");
        return Statement {
            rows: Vec::new(),
            opening_balance: Decimal::ZERO,
            closing_balance: Decimal::ZERO,
            currency: DEFAULT_CURRENCY.to_owned(),
        };
    };

    let mut movements = collect_movements(snapshot, account_id);
    movements.retain(|movement| movement.date >= account.balance_date);
    movements.sort_by_key(|movement| movement.date);

    let opening_balance: Decimal = account.initial_balance
        + movements
            .iter()
            .filter(|movement| movement.date < period_start)
            .map(|movement| movement.amount)
            .sum::<Decimal>();

    let mut running = opening_balance;
    let rows: Vec<StatementRow> = movements
        .into_iter()
        .filter(|movement| movement.date >= period_start && movement.date <= period_end)
        .map(|movement| {
            running += movement.amount;
            let credit = (movement.amount > Decimal::ZERO).then_some(movement.amount);
            let debit = (movement.amount < Decimal::ZERO).then_some(-movement.amount);
            StatementRow {
                date: movement.date,
                description: movement.description,
                category: movement.category,
                kind: movement.kind,
                credit,
                debit,
                balance: running,
            }
        })
        .collect();

    Statement {
        closing_balance: rows.last().map_or(opening_balance, |row| row.balance),
        rows,
        opening_balance,
        currency: account.currency.clone(),
    }
}

/// Gathers every movement touching the account, unsorted.
fn collect_movements(snapshot: &Snapshot, account_id: AccountId) -> Vec<Movement> {
    let mut movements = Vec::new();
    for tx in snapshot.incomes.iter().filter(|tx| tx.account_id == account_id) {
        movements.push(Movement {
            date: tx.date,
            description: tx.description.clone(),
            category: tx.category.clone(),
            kind: EntryKind::Income,
            amount: tx.amount,
        });
    }
    for tx in snapshot.expenses.iter().filter(|tx| tx.account_id == account_id) {
        movements.push(Movement {
            date: tx.date,
            description: tx.description.clone(),
            category: tx.category.clone(),
            kind: EntryKind::Expense,
            amount: -tx.amount,
        });
    }
    for transfer in &snapshot.transfers {
        if transfer.from_id == account_id {
            movements.push(Movement {
                date: transfer.date,
                description: format!("Para {}", counterparty_name(snapshot, transfer.to_id)),
                category: TRANSFER_CATEGORY.to_owned(),
                kind: EntryKind::TransferOut,
                amount: -transfer.from_amount,
            });
        }
        if transfer.to_id == account_id {
            movements.push(Movement {
                date: transfer.date,
                description: format!("De {}", counterparty_name(snapshot, transfer.from_id)),
                category: TRANSFER_CATEGORY.to_owned(),
                kind: EntryKind::TransferIn,
                amount: transfer.to_amount,
            });
        }
    }
    movements
}

/// Counterparty display name, degrading on lookup miss.
fn counterparty_name(snapshot: &Snapshot, id: AccountId) -> &str {
    snapshot
        .account(id)
        .map_or("conta desconhecida", |account| account.name.as_str())
}
