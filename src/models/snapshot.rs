//! The complete in-memory dashboard state.
//!
//! A [`Snapshot`] holds every entity collection at one point in time.
//! Mutations follow the source system's policy: apply the change, then
//! recompute every derived balance from the full history
//! (recompute-on-every-change, trading CPU for correctness at personal
//! data volumes). Callers persist the whole snapshot afterwards; nothing
//! here performs I/O.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::balance;
use crate::error::{MajordomeError, Result};

use super::{
    Account, AccountId, Category, FixedExpense, FixedExpenseId, GoalId, SavingsGoal, Transaction,
    TransactionId, Transfer, TransferId,
};

/// Currency reported for lookups that miss (unknown account).
pub const DEFAULT_CURRENCY: &str = "BRL";

/// Category name recorded on goal-contribution expenses.
const GOAL_CONTRIBUTION_CATEGORY: &str = "Poupança e Investimentos";

/// The complete set of entity collections at one point in time.
///
/// Field names in the persisted JSON layout follow the original
/// dashboard's storage object (`bankAccounts`, `income`,
/// `fixedExpenses`, ...), so an exported browser snapshot loads as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// All bank accounts, with derived balances.
    #[serde(rename = "bankAccounts", default)]
    pub accounts: Vec<Account>,
    /// Recorded income transactions.
    #[serde(rename = "income", default)]
    pub incomes: Vec<Transaction>,
    /// Recorded expense transactions.
    #[serde(default)]
    pub expenses: Vec<Transaction>,
    /// Recorded transfers between accounts.
    #[serde(default)]
    pub transfers: Vec<Transfer>,
    /// Fixed recurring expenses.
    #[serde(rename = "fixedExpenses", default)]
    pub fixed_expenses: Vec<FixedExpense>,
    /// Savings goals.
    #[serde(rename = "savingsGoals", default)]
    pub savings_goals: Vec<SavingsGoal>,
    /// Transaction categories.
    #[serde(rename = "rawCategories", default)]
    pub categories: Vec<Category>,
}

impl Snapshot {
    /// Creates an empty snapshot.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ── Lookups ─────────────────────────────────────────────────────

    /// Finds an account by ID.
    #[inline]
    #[must_use]
    pub fn account(&self, id: AccountId) -> Option<&Account> {
        self.accounts.iter().find(|account| account.id == id)
    }

    /// Returns the currency of the given account, or [`DEFAULT_CURRENCY`]
    /// when the account is unknown (lookup-miss policy: degrade, never
    /// fail).
    #[inline]
    #[must_use]
    pub fn account_currency(&self, id: AccountId) -> &str {
        self.account(id)
            .map_or(DEFAULT_CURRENCY, |account| account.currency.as_str())
    }

    /// Finds a savings goal by ID.
    #[inline]
    #[must_use]
    pub fn goal(&self, id: &GoalId) -> Option<&SavingsGoal> {
        self.savings_goals.iter().find(|goal| goal.id == *id)
    }

    /// Accounts that can fund the given goal: same currency as the
    /// goal's target account. When the target account is unknown, every
    /// account qualifies.
    #[must_use]
    pub fn compatible_funding_accounts(&self, goal: &SavingsGoal) -> Vec<&Account> {
        match self.account(goal.account_id) {
            Some(target) => self
                .accounts
                .iter()
                .filter(|account| account.currency == target.currency)
                .collect(),
            None => self.accounts.iter().collect(),
        }
    }

    // ── Derived state ───────────────────────────────────────────────

    /// Recomputes every account's `current_balance` from the full
    /// transaction history. Called by every mutation op; callers that
    /// edit collections directly should call it themselves before
    /// reading balances.
    #[inline]
    pub fn recompute_balances(&mut self) {
        self.accounts = balance::compute_account_balances(self);
    }

    // ── Mutations (add) ─────────────────────────────────────────────

    /// Records an income and recomputes balances.
    #[inline]
    pub fn add_income(&mut self, transaction: Transaction) {
        self.incomes.push(transaction);
        self.recompute_balances();
    }

    /// Records an expense and recomputes balances.
    #[inline]
    pub fn add_expense(&mut self, transaction: Transaction) {
        self.expenses.push(transaction);
        self.recompute_balances();
    }

    /// Records a transfer and recomputes balances.
    ///
    /// # Errors
    ///
    /// Returns [`MajordomeError::SelfTransfer`] if source and
    /// destination are the same account; the snapshot is left unchanged.
    pub fn add_transfer(&mut self, transfer: Transfer) -> Result<()> {
        if transfer.is_self_transfer() {
            return Err(MajordomeError::SelfTransfer {
                account: transfer.from_id,
            });
        }
        self.transfers.push(transfer);
        self.recompute_balances();
        Ok(())
    }

    /// Registers a fixed recurring expense.
    #[inline]
    pub fn add_fixed_expense(&mut self, fixed: FixedExpense) {
        self.fixed_expenses.push(fixed);
        self.recompute_balances();
    }

    /// Registers a savings goal.
    #[inline]
    pub fn add_goal(&mut self, goal: SavingsGoal) {
        self.savings_goals.push(goal);
        self.recompute_balances();
    }

    /// Registers a category.
    #[inline]
    pub fn add_category(&mut self, category: Category) {
        self.categories.push(category);
    }

    // ── Mutations (update) ──────────────────────────────────────────

    /// Replaces the income with the same ID, if present.
    pub fn update_income(&mut self, transaction: Transaction) {
        replace_by(&mut self.incomes, transaction, |a, b| a.id == b.id);
        self.recompute_balances();
    }

    /// Replaces the expense with the same ID, if present.
    pub fn update_expense(&mut self, transaction: Transaction) {
        replace_by(&mut self.expenses, transaction, |a, b| a.id == b.id);
        self.recompute_balances();
    }

    // ── Mutations (remove) ──────────────────────────────────────────

    /// Removes an income by ID (filter-out; no soft-delete).
    pub fn remove_income(&mut self, id: &TransactionId) {
        self.incomes.retain(|tx| tx.id != *id);
        self.recompute_balances();
    }

    /// Removes an expense by ID.
    pub fn remove_expense(&mut self, id: &TransactionId) {
        self.expenses.retain(|tx| tx.id != *id);
        self.recompute_balances();
    }

    /// Removes a transfer by ID.
    pub fn remove_transfer(&mut self, id: &TransferId) {
        self.transfers.retain(|transfer| transfer.id != *id);
        self.recompute_balances();
    }

    /// Removes a fixed expense by ID.
    pub fn remove_fixed_expense(&mut self, id: &FixedExpenseId) {
        self.fixed_expenses.retain(|fixed| fixed.id != *id);
        self.recompute_balances();
    }

    /// Removes a savings goal by ID. Past contribution expenses stay in
    /// the ledger.
    pub fn remove_goal(&mut self, id: &GoalId) {
        self.savings_goals.retain(|goal| goal.id != *id);
        self.recompute_balances();
    }

    // ── Goal contributions ──────────────────────────────────────────

    /// Contributes `amount` from `from_account` to the goal: records an
    /// expense in the goal-contribution category against the funding
    /// account and bumps the goal's contributed total.
    ///
    /// Returns `false` (and leaves the snapshot unchanged) when the goal
    /// is unknown. Funding-account balance checks belong to the form
    /// boundary, not here.
    #[must_use]
    pub fn contribute_to_goal(
        &mut self,
        goal_id: &GoalId,
        from_account: AccountId,
        amount: Decimal,
        date: NaiveDate,
        transaction_id: TransactionId,
    ) -> bool {
        let Some(goal) = self
            .savings_goals
            .iter_mut()
            .find(|goal| goal.id == *goal_id)
        else {
            tracing::warn!(goal = %goal_id, "contribution to unknown goal ignored");
            return false;
        };
        goal.current_amount += amount;
        let description = format!("Contribuição para a meta \"{}\"", goal.name);
        self.expenses.push(Transaction {
            id: transaction_id,
            account_id: from_account,
            description,
            category: GOAL_CONTRIBUTION_CATEGORY.to_owned(),
            amount,
            date,
        });
        self.recompute_balances();
        true
    }
}

/// Replaces the first element matching `eq` with `item`; appends nothing
/// when no element matches.
fn replace_by<T>(items: &mut [T], item: T, eq: fn(&T, &T) -> bool) {
    if let Some(slot) = items.iter_mut().find(|existing| eq(existing, &item)) {
        *slot = item;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Recurrence;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn account(id: i64, currency: &str, initial: i64) -> Account {
        Account {
            id: AccountId::new(id),
            name: format!("Account {id}"),
            currency: currency.to_owned(),
            initial_balance: Decimal::from(initial),
            balance_date: date(2025, 1, 1),
            min_balance: Decimal::ZERO,
            current_balance: Decimal::ZERO,
        }
    }

    fn expense(id: &str, account_id: i64, amount: i64, day: u32) -> Transaction {
        Transaction {
            id: TransactionId::new(id.to_owned()),
            account_id: AccountId::new(account_id),
            description: "test".to_owned(),
            category: "Supermercado".to_owned(),
            amount: Decimal::from(amount),
            date: date(2025, 2, day),
        }
    }

    #[test]
    fn empty_snapshot_roundtrip() {
        let snapshot = Snapshot::new();
        let json = serde_json::to_string(&snapshot).unwrap();
        let deserialized: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, snapshot);
    }

    #[test]
    fn deserialize_persisted_layout_keys() {
        // The browser-era storage object: collection keys survive as-is.
        let json = r#"{
            "bankAccounts": [],
            "income": [],
            "expenses": [],
            "transfers": [],
            "fixedExpenses": [],
            "savingsGoals": [],
            "rawCategories": []
        }"#;
        let snapshot: Snapshot = serde_json::from_str(json).unwrap();
        assert!(snapshot.accounts.is_empty());
        assert!(snapshot.fixed_expenses.is_empty());
    }

    #[test]
    fn missing_collections_default_to_empty() {
        let snapshot: Snapshot = serde_json::from_str("{}").unwrap();
        assert!(snapshot.accounts.is_empty());
        assert!(snapshot.savings_goals.is_empty());
    }

    #[test]
    fn account_currency_defaults_on_miss() {
        let mut snapshot = Snapshot::new();
        snapshot.accounts.push(account(3, "EUR", 200));
        assert_eq!(snapshot.account_currency(AccountId::new(3)), "EUR");
        assert_eq!(snapshot.account_currency(AccountId::new(99)), DEFAULT_CURRENCY);
    }

    #[test]
    fn add_expense_recomputes_balance() {
        let mut snapshot = Snapshot::new();
        snapshot.accounts.push(account(1, "BRL", 1000));
        snapshot.recompute_balances();
        snapshot.add_expense(expense("e-1", 1, 300, 10));
        let updated = snapshot.account(AccountId::new(1)).unwrap();
        assert_eq!(updated.current_balance, Decimal::from(700));
    }

    #[test]
    fn self_transfer_is_rejected_and_state_unchanged() {
        let mut snapshot = Snapshot::new();
        snapshot.accounts.push(account(1, "BRL", 100));
        let result = snapshot.add_transfer(Transfer {
            id: TransferId::new("tr-1".to_owned()),
            from_id: AccountId::new(1),
            to_id: AccountId::new(1),
            from_amount: Decimal::from(10),
            to_amount: Decimal::from(10),
            date: date(2025, 2, 1),
            description: None,
        });
        assert!(matches!(
            result,
            Err(MajordomeError::SelfTransfer { account }) if account == AccountId::new(1)
        ));
        assert!(snapshot.transfers.is_empty());
    }

    #[test]
    fn remove_expense_restores_balance() {
        let mut snapshot = Snapshot::new();
        snapshot.accounts.push(account(1, "BRL", 1000));
        snapshot.add_expense(expense("e-1", 1, 300, 10));
        snapshot.remove_expense(&TransactionId::new("e-1".to_owned()));
        let updated = snapshot.account(AccountId::new(1)).unwrap();
        assert_eq!(updated.current_balance, Decimal::from(1000));
    }

    #[test]
    fn update_expense_replaces_by_id() {
        let mut snapshot = Snapshot::new();
        snapshot.accounts.push(account(1, "BRL", 1000));
        snapshot.add_expense(expense("e-1", 1, 300, 10));
        snapshot.update_expense(expense("e-1", 1, 450, 12));
        assert_eq!(snapshot.expenses.len(), 1);
        let updated = snapshot.account(AccountId::new(1)).unwrap();
        assert_eq!(updated.current_balance, Decimal::from(550));
    }

    #[test]
    fn contribute_to_goal_records_expense_and_bumps_total() {
        let mut snapshot = Snapshot::new();
        snapshot.accounts.push(account(1, "BRL", 1000));
        snapshot.savings_goals.push(SavingsGoal {
            id: GoalId::new("g-1".to_owned()),
            name: "Viagem Curta".to_owned(),
            target_amount: Decimal::from(1500),
            current_amount: Decimal::from(450),
            account_id: AccountId::new(1),
            deadline: None,
        });

        let contributed = snapshot.contribute_to_goal(
            &GoalId::new("g-1".to_owned()),
            AccountId::new(1),
            Decimal::from(200),
            date(2025, 2, 15),
            TransactionId::new("tx-goal-1".to_owned()),
        );

        assert!(contributed);
        let goal = snapshot.goal(&GoalId::new("g-1".to_owned())).unwrap();
        assert_eq!(goal.current_amount, Decimal::from(650));
        let recorded = snapshot.expenses.last().unwrap();
        assert_eq!(recorded.category, GOAL_CONTRIBUTION_CATEGORY);
        assert!(recorded.description.contains("Viagem Curta"));
        let funding = snapshot.account(AccountId::new(1)).unwrap();
        assert_eq!(funding.current_balance, Decimal::from(800));
    }

    #[test]
    fn contribute_to_unknown_goal_is_a_no_op() {
        let mut snapshot = Snapshot::new();
        snapshot.accounts.push(account(1, "BRL", 1000));
        let contributed = snapshot.contribute_to_goal(
            &GoalId::new("missing".to_owned()),
            AccountId::new(1),
            Decimal::from(200),
            date(2025, 2, 15),
            TransactionId::new("tx-goal-1".to_owned()),
        );
        assert!(!contributed);
        assert!(snapshot.expenses.is_empty());
    }

    #[test]
    fn compatible_funding_accounts_filters_by_currency() {
        let mut snapshot = Snapshot::new();
        snapshot.accounts.push(account(1, "BRL", 1000));
        snapshot.accounts.push(account(2, "BRL", 500));
        snapshot.accounts.push(account(3, "EUR", 200));
        let goal = SavingsGoal {
            id: GoalId::new("g-1".to_owned()),
            name: "Reserva".to_owned(),
            target_amount: Decimal::from(5000),
            current_amount: Decimal::ZERO,
            account_id: AccountId::new(2),
            deadline: None,
        };
        let compatible = snapshot.compatible_funding_accounts(&goal);
        let ids: Vec<AccountId> = compatible.iter().map(|account| account.id).collect();
        assert_eq!(ids, vec![AccountId::new(1), AccountId::new(2)]);
    }

    #[test]
    fn unknown_goal_account_allows_every_funder() {
        let mut snapshot = Snapshot::new();
        snapshot.accounts.push(account(1, "BRL", 1000));
        snapshot.accounts.push(account(3, "EUR", 200));
        let goal = SavingsGoal {
            id: GoalId::new("g-1".to_owned()),
            name: "Reserva".to_owned(),
            target_amount: Decimal::from(5000),
            current_amount: Decimal::ZERO,
            account_id: AccountId::new(42),
            deadline: None,
        };
        assert_eq!(snapshot.compatible_funding_accounts(&goal).len(), 2);
    }

    #[test]
    fn fixed_expense_mutations() {
        let mut snapshot = Snapshot::new();
        snapshot.add_fixed_expense(FixedExpense {
            id: FixedExpenseId::new("fx-1".to_owned()),
            account_id: AccountId::new(1),
            description: "Aluguel Fixo".to_owned(),
            category: "Aluguel".to_owned(),
            amount: Decimal::from(800),
            recurrence: Recurrence::Monthly,
            start_date: date(2025, 1, 1),
            end_date: None,
        });
        assert_eq!(snapshot.fixed_expenses.len(), 1);
        snapshot.remove_fixed_expense(&FixedExpenseId::new("fx-1".to_owned()));
        assert!(snapshot.fixed_expenses.is_empty());
    }
}
