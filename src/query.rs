//! Transaction querying.
//!
//! [`TransactionFilter`] is a composable, builder-style filter over the
//! snapshot's transaction collections; [`category_totals`] implements
//! the dashboard's category search, grouping matched amounts by the
//! owning account's currency.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AccountId, CategoryKind, Snapshot, Transaction};

/// Composable filter for querying transactions.
///
/// Use builder-style methods to chain multiple criteria. All conditions
/// are combined — a transaction must satisfy every set criterion to
/// pass.
///
/// # Examples
///
/// ```
/// use majordome_core::query::TransactionFilter;
/// use majordome_core::models::{AccountId, NaiveDate};
///
/// let filter = TransactionFilter::new()
///     .date_range(
///         NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
///         NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
///     )
///     .account(AccountId::new(1))
///     .category("Supermercado");
/// ```
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TransactionFilter {
    /// Start date (inclusive).
    pub date_from: Option<NaiveDate>,
    /// End date (inclusive).
    pub date_to: Option<NaiveDate>,
    /// Owning account.
    pub account: Option<AccountId>,
    /// Category name (matched by value, exact).
    pub category: Option<String>,
    /// Description substring (case-insensitive).
    pub description: Option<String>,
    /// Minimum amount (inclusive).
    pub min_amount: Option<Decimal>,
    /// Maximum amount (inclusive).
    pub max_amount: Option<Decimal>,
}

impl TransactionFilter {
    /// Creates an empty filter that matches all transactions.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to transactions within the given date range (inclusive).
    #[inline]
    #[must_use]
    pub const fn date_range(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.date_from = Some(from);
        self.date_to = Some(to);
        self
    }

    /// Restricts to transactions owned by the given account.
    #[inline]
    #[must_use]
    pub const fn account(mut self, id: AccountId) -> Self {
        self.account = Some(id);
        self
    }

    /// Restricts to transactions in the given category.
    #[inline]
    #[must_use]
    pub fn category<T: Into<String>>(mut self, name: T) -> Self {
        self.category = Some(name.into());
        self
    }

    /// Restricts to transactions whose description contains the given
    /// substring (case-insensitive).
    #[inline]
    #[must_use]
    pub fn description<T: Into<String>>(mut self, text: T) -> Self {
        self.description = Some(text.into());
        self
    }

    /// Restricts to transactions with amounts in `[min, max]`.
    #[inline]
    #[must_use]
    pub const fn amount_range(mut self, min: Decimal, max: Decimal) -> Self {
        self.min_amount = Some(min);
        self.max_amount = Some(max);
        self
    }

    /// Returns `true` if the transaction satisfies all set criteria.
    #[inline]
    #[must_use]
    pub fn matches(&self, tx: &Transaction) -> bool {
        self.matches_date(tx)
            && self.matches_account(tx)
            && self.matches_category(tx)
            && self.matches_description(tx)
            && self.matches_amount(tx)
    }

    /// Applies the filter to a transaction slice, preserving order.
    #[inline]
    #[must_use]
    pub fn apply<'snap>(&self, transactions: &'snap [Transaction]) -> Vec<&'snap Transaction> {
        transactions.iter().filter(|tx| self.matches(tx)).collect()
    }

    /// Checks date range criteria.
    fn matches_date(&self, tx: &Transaction) -> bool {
        self.date_from.is_none_or(|from| tx.date >= from)
            && self.date_to.is_none_or(|to| tx.date <= to)
    }

    /// Checks account criteria.
    fn matches_account(&self, tx: &Transaction) -> bool {
        self.account.is_none_or(|id| tx.account_id == id)
    }

    /// Checks category criteria.
    fn matches_category(&self, tx: &Transaction) -> bool {
        self.category
            .as_ref()
            .is_none_or(|category| tx.category == *category)
    }

    /// Checks description criteria.
    fn matches_description(&self, tx: &Transaction) -> bool {
        self.description.as_ref().is_none_or(|needle| {
            tx.description
                .to_lowercase()
                .contains(&needle.to_lowercase())
        })
    }

    /// Checks amount criteria.
    fn matches_amount(&self, tx: &Transaction) -> bool {
        self.min_amount.is_none_or(|min| tx.amount >= min)
            && self.max_amount.is_none_or(|max| tx.amount <= max)
    }
}

/// Result of a category search: the matching transactions and their
/// totals grouped by currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotals {
    /// Matching transactions, in collection order.
    pub transactions: Vec<Transaction>,
    /// Sum of matched amounts per currency code. Transactions owned by
    /// an unknown account count under the default currency.
    pub totals_by_currency: BTreeMap<String, Decimal>,
}

/// Searches one category over `[from, to]` and totals the matches per
/// currency.
///
/// `kind` selects the source collection: incomes for
/// [`CategoryKind::Income`], expenses for [`CategoryKind::Expense`].
#[must_use]
pub fn category_totals(
    snapshot: &Snapshot,
    kind: CategoryKind,
    category: &str,
    from: NaiveDate,
    to: NaiveDate,
) -> CategoryTotals {
    let source = match kind {
        CategoryKind::Income => &snapshot.incomes,
        CategoryKind::Expense => &snapshot.expenses,
    };
    let filter = TransactionFilter::new()
        .category(category)
        .date_range(from, to);

    let mut totals_by_currency: BTreeMap<String, Decimal> = BTreeMap::new();
    let mut transactions = Vec::new();
    for tx in source.iter().filter(|tx| filter.matches(tx)) {
        let currency = snapshot.account_currency(tx.account_id).to_owned();
        *totals_by_currency.entry(currency).or_default() += tx.amount;
        transactions.push(tx.clone());
    }
    CategoryTotals {
        transactions,
        totals_by_currency,
    }
}
