//! Budget lifecycle helpers and projection refresh over store snapshots.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::Config;
use crate::core::{
    aggregate::{total_spent, BudgetProgress},
    filter::filter_transactions,
    period::window_for,
    storage::BudgetStore,
};
use crate::domain::{Budget, BudgetDraft, BudgetPeriod, PeriodWindow, Transaction};
use crate::errors::{EngineError, Result};

/// A budget with its current window and progress, as shown in budget lists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetOverview {
    pub budget: Budget,
    pub window: PeriodWindow,
    pub progress: BudgetProgress,
}

/// Stateless budgeting utilities that operate over store snapshots.
pub struct BudgetService;

impl BudgetService {
    /// Validates `draft` and materialises a new budget without storing it.
    /// Missing start dates default to `today` and missing thresholds to the
    /// configured default.
    pub fn build(draft: BudgetDraft, config: &Config, today: NaiveDate) -> Result<Budget> {
        Self::validate_scope(&draft.category_ids)?;
        Self::validate_amount(draft.amount)?;
        let threshold = draft.alert_threshold.unwrap_or(config.default_alert_threshold);
        Self::validate_threshold(threshold)?;
        let start = draft.start_date.unwrap_or(today);
        Self::validate_dates(draft.period, start, draft.end_date)?;
        Ok(draft.into_budget(start, threshold))
    }

    /// Validates and stores a new budget, returning the stored record.
    pub fn create(
        store: &dyn BudgetStore,
        draft: BudgetDraft,
        config: &Config,
        today: NaiveDate,
    ) -> Result<Budget> {
        let budget = Self::build(draft, config, today)?;
        store.add_budget(budget.clone())?;
        info!(budget_id = %budget.id, period = %budget.period, "budget created");
        Ok(budget)
    }

    /// Re-validates an edited budget before passing it to the store.
    pub fn update(store: &dyn BudgetStore, budget: Budget) -> Result<()> {
        Self::validate(&budget)?;
        store.update_budget(budget)
    }

    pub fn delete(store: &dyn BudgetStore, id: &str) -> Result<()> {
        if !store.delete_budget(id)? {
            return Err(EngineError::BudgetNotFound(id.to_string()));
        }
        info!(budget_id = id, "budget deleted");
        Ok(())
    }

    pub fn validate(budget: &Budget) -> Result<()> {
        Self::validate_scope(&budget.categories())?;
        Self::validate_amount(budget.amount)?;
        Self::validate_threshold(budget.alert_threshold)?;
        Self::validate_dates(budget.period, budget.start_date, budget.end_date)
    }

    /// Overwrites `spent` and `transaction_count` from the transactions that
    /// fall in the window containing `today`.
    pub fn recalculate_spent(budget: &mut Budget, transactions: &[Transaction], today: NaiveDate) {
        let window = window_for(budget, today, 0);
        let matched =
            filter_transactions(transactions, &budget.categories(), &budget.account_ids, window);
        budget.spent = total_spent(&matched);
        budget.transaction_count = matched.len();
    }

    /// Current-window progress for each budget, in the order given.
    pub fn overview(
        budgets: &[Budget],
        transactions: &[Transaction],
        today: NaiveDate,
    ) -> Vec<BudgetOverview> {
        budgets
            .iter()
            .map(|budget| {
                let mut budget = budget.clone();
                Self::recalculate_spent(&mut budget, transactions, today);
                BudgetOverview {
                    window: window_for(&budget, today, 0),
                    progress: BudgetProgress::from_parts(
                        budget.amount,
                        budget.spent,
                        budget.alert_threshold,
                    ),
                    budget,
                }
            })
            .collect()
    }

    fn validate_scope(categories: &BTreeSet<String>) -> Result<()> {
        if categories.iter().all(|id| id.trim().is_empty()) {
            return Err(EngineError::Validation(
                "budget needs at least one category".into(),
            ));
        }
        Ok(())
    }

    fn validate_amount(amount: f64) -> Result<()> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(EngineError::Validation(format!(
                "budget amount must be positive, got {amount}"
            )));
        }
        Ok(())
    }

    fn validate_threshold(threshold: u8) -> Result<()> {
        if threshold > 100 {
            return Err(EngineError::Validation(format!(
                "alert threshold must be between 0 and 100, got {threshold}"
            )));
        }
        Ok(())
    }

    fn validate_dates(period: BudgetPeriod, start: NaiveDate, end: Option<NaiveDate>) -> Result<()> {
        if period != BudgetPeriod::Once {
            return Ok(());
        }
        match end {
            None => Err(EngineError::Validation(
                "one-off budgets need an end date".into(),
            )),
            Some(end) if end < start => Err(EngineError::Validation(format!(
                "end date {end} precedes start date {start}"
            ))),
            Some(_) => Ok(()),
        }
    }
}
