//! Domain core for the Majordome personal-finance dashboard.
//!
//! This crate holds the typed domain state of the dashboard — accounts,
//! transactions, transfers, fixed recurring expenses, savings goals and
//! categories — as a single in-memory [`models::Snapshot`], together with
//! the pure calculators derived from it:
//!
//! - [`balance`] recomputes every account's current balance from the full
//!   transaction history after each mutation;
//! - [`forecast`] projects an account's balance forward over a bounded
//!   window, materializing fixed-expense recurrences into synthetic
//!   entries;
//! - [`statement`] assembles a per-account consolidated statement with
//!   running balances over a calendar period;
//! - [`query`] provides composable transaction filtering and per-currency
//!   category totals.
//!
//! Persistence is a synchronous whole-snapshot write through the
//! [`storage::Storage`] trait; the calculators themselves never touch
//! storage and are deterministic for a given snapshot.

pub mod balance;
pub mod error;
pub mod forecast;
pub mod models;
pub mod query;
pub mod statement;
pub mod storage;
