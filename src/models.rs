//! Data models for the Majordome dashboard snapshot.
//!
//! This module contains strongly-typed representations of every entity
//! the dashboard persists, newtype ID wrappers, enumeration types for
//! constrained values, and the [`Snapshot`] holding the complete
//! in-memory state.

mod account;
mod category;
mod enums;
mod fixed_expense;
mod ids;
mod savings_goal;
mod snapshot;
mod transaction;
mod transfer;

pub use account::Account;
pub use category::Category;
pub use enums::{CategoryKind, EntryKind, Recurrence};
pub use fixed_expense::FixedExpense;
pub use ids::{AccountId, CategoryId, FixedExpenseId, GoalId, TransactionId, TransferId};
pub use savings_goal::SavingsGoal;
pub use snapshot::{Snapshot, DEFAULT_CURRENCY};
pub use transaction::Transaction;
pub use transfer::Transfer;

pub use chrono::NaiveDate;
