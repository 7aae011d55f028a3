//! Collaborator contracts for transaction and budget data, plus an in-memory
//! implementation of both.

use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        RwLock,
    },
};

use chrono::NaiveDate;
use tracing::debug;

use crate::core::services::BudgetService;
use crate::domain::{Budget, Transaction};
use crate::errors::{EngineError, Result};

/// Source of transactions, queried by inclusive date range.
pub trait TransactionSource: Send + Sync {
    fn transactions_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Transaction>>;

    /// Monotonic counter bumped whenever the underlying data changes. Sources
    /// that cannot report changes keep the default.
    fn revision(&self) -> u64 {
        0
    }
}

/// Persistence boundary for budget records.
pub trait BudgetStore: Send + Sync {
    fn active_budgets(&self, user_id: &str) -> Result<Vec<Budget>>;
    fn budget_by_id(&self, id: &str) -> Result<Option<Budget>>;
    fn add_budget(&self, budget: Budget) -> Result<()>;
    fn update_budget(&self, budget: Budget) -> Result<()>;
    /// Returns whether a record was removed.
    fn delete_budget(&self, id: &str) -> Result<bool>;
    /// Refreshes the `spent`/`transaction_count` projections of every active
    /// budget owned by `user_id`, returning how many were refreshed.
    fn recalculate_all_budgets(&self, user_id: &str, today: NaiveDate) -> Result<usize>;

    fn revision(&self) -> u64 {
        0
    }
}

/// Thread-safe in-memory store serving both collaborator roles.
#[derive(Debug, Default)]
pub struct MemoryStore {
    transactions: RwLock<Vec<Transaction>>,
    budgets: RwLock<BTreeMap<String, Budget>>,
    transactions_revision: AtomicU64,
    budgets_revision: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transactions(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions: RwLock::new(transactions),
            ..Self::default()
        }
    }

    pub fn add_transaction(&self, transaction: Transaction) -> Result<()> {
        self.transactions
            .write()
            .map_err(|_| poisoned("transactions"))?
            .push(transaction);
        self.transactions_revision.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    pub fn remove_transaction(&self, id: &str) -> Result<bool> {
        let mut guard = self.transactions.write().map_err(|_| poisoned("transactions"))?;
        let before = guard.len();
        guard.retain(|txn| txn.id != id);
        let removed = guard.len() != before;
        if removed {
            self.transactions_revision.fetch_add(1, Ordering::SeqCst);
        }
        Ok(removed)
    }

    fn all_transactions(&self) -> Result<Vec<Transaction>> {
        Ok(self
            .transactions
            .read()
            .map_err(|_| poisoned("transactions"))?
            .clone())
    }
}

impl TransactionSource for MemoryStore {
    fn transactions_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Transaction>> {
        let guard = self.transactions.read().map_err(|_| poisoned("transactions"))?;
        Ok(guard
            .iter()
            .filter(|txn| txn.date >= start && txn.date <= end)
            .cloned()
            .collect())
    }

    fn revision(&self) -> u64 {
        self.transactions_revision.load(Ordering::SeqCst)
    }
}

impl BudgetStore for MemoryStore {
    fn active_budgets(&self, user_id: &str) -> Result<Vec<Budget>> {
        let guard = self.budgets.read().map_err(|_| poisoned("budgets"))?;
        Ok(guard
            .values()
            .filter(|budget| budget.active && budget.user_id == user_id)
            .cloned()
            .collect())
    }

    fn budget_by_id(&self, id: &str) -> Result<Option<Budget>> {
        let guard = self.budgets.read().map_err(|_| poisoned("budgets"))?;
        Ok(guard.get(id).cloned())
    }

    fn add_budget(&self, budget: Budget) -> Result<()> {
        let mut guard = self.budgets.write().map_err(|_| poisoned("budgets"))?;
        if guard.contains_key(&budget.id) {
            return Err(EngineError::Store(format!(
                "budget `{}` already exists",
                budget.id
            )));
        }
        guard.insert(budget.id.clone(), budget);
        self.budgets_revision.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn update_budget(&self, budget: Budget) -> Result<()> {
        let mut guard = self.budgets.write().map_err(|_| poisoned("budgets"))?;
        let slot = guard
            .get_mut(&budget.id)
            .ok_or_else(|| EngineError::BudgetNotFound(budget.id.clone()))?;
        *slot = budget;
        self.budgets_revision.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn delete_budget(&self, id: &str) -> Result<bool> {
        let removed = self
            .budgets
            .write()
            .map_err(|_| poisoned("budgets"))?
            .remove(id)
            .is_some();
        if removed {
            self.budgets_revision.fetch_add(1, Ordering::SeqCst);
        }
        Ok(removed)
    }

    fn recalculate_all_budgets(&self, user_id: &str, today: NaiveDate) -> Result<usize> {
        let transactions = self.all_transactions()?;
        let mut guard = self.budgets.write().map_err(|_| poisoned("budgets"))?;
        let mut refreshed = 0usize;
        for budget in guard
            .values_mut()
            .filter(|budget| budget.active && budget.user_id == user_id)
        {
            BudgetService::recalculate_spent(budget, &transactions, today);
            refreshed += 1;
        }
        if refreshed > 0 {
            self.budgets_revision.fetch_add(1, Ordering::SeqCst);
        }
        debug!(user_id, refreshed, "recalculated budget projections");
        Ok(refreshed)
    }

    fn revision(&self) -> u64 {
        self.budgets_revision.load(Ordering::SeqCst)
    }
}

fn poisoned(what: &str) -> EngineError {
    EngineError::Store(format!("{what} lock poisoned"))
}
