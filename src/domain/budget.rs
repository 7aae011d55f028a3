use std::{collections::BTreeSet, fmt};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Recurrence granularity of a budget.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum BudgetPeriod {
    Daily,
    Weekly,
    #[default]
    Monthly,
    Yearly,
    Once,
}

impl BudgetPeriod {
    /// Returns `true` when the period has more than one window to navigate.
    pub fn is_recurring(self) -> bool {
        !matches!(self, BudgetPeriod::Once)
    }
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BudgetPeriod::Daily => "Daily",
            BudgetPeriod::Weekly => "Weekly",
            BudgetPeriod::Monthly => "Monthly",
            BudgetPeriod::Yearly => "Yearly",
            BudgetPeriod::Once => "Once",
        };
        f.write_str(label)
    }
}

/// A recurring or one-off spending limit scoped to categories and accounts.
///
/// `spent` and `transaction_count` are projections refreshed from the
/// transaction log on every load; they are never authoritative.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Budget {
    pub id: String,
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub category_ids: BTreeSet<String>,
    /// Single-category field kept for records written before multi-category
    /// scopes existed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(default)]
    pub account_ids: BTreeSet<String>,
    pub period: BudgetPeriod,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub amount: f64,
    #[serde(default)]
    pub spent: f64,
    #[serde(default)]
    pub transaction_count: usize,
    pub alert_threshold: u8,
    #[serde(default = "Budget::default_active")]
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Budget {
    /// Canonical category scope: the multi-category set when present,
    /// otherwise the legacy single id. Blank ids are ignored.
    pub fn categories(&self) -> BTreeSet<String> {
        let set: BTreeSet<String> = self
            .category_ids
            .iter()
            .filter(|id| !id.trim().is_empty())
            .cloned()
            .collect();
        if !set.is_empty() {
            return set;
        }
        self.category_id
            .iter()
            .filter(|id| !id.trim().is_empty())
            .cloned()
            .collect()
    }

    /// Legacy single category id, derived from the canonical set.
    pub fn primary_category(&self) -> Option<String> {
        self.categories().into_iter().next()
    }

    /// `true` when the budget covers every account.
    pub fn applies_to_all_accounts(&self) -> bool {
        self.account_ids.is_empty()
    }

    pub fn default_active() -> bool {
        true
    }
}

/// User input for creating a budget before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BudgetDraft {
    pub user_id: String,
    pub name: String,
    pub category_ids: BTreeSet<String>,
    pub account_ids: BTreeSet<String>,
    pub period: BudgetPeriod,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub amount: f64,
    pub alert_threshold: Option<u8>,
}

impl BudgetDraft {
    pub fn new(user_id: impl Into<String>, name: impl Into<String>, amount: f64) -> Self {
        Self {
            user_id: user_id.into(),
            name: name.into(),
            amount,
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category_id: impl Into<String>) -> Self {
        self.category_ids.insert(category_id.into());
        self
    }

    pub fn with_account(mut self, account_id: impl Into<String>) -> Self {
        self.account_ids.insert(account_id.into());
        self
    }

    pub fn with_period(mut self, period: BudgetPeriod) -> Self {
        self.period = period;
        self
    }

    pub fn starting(mut self, start: NaiveDate) -> Self {
        self.start_date = Some(start);
        self
    }

    pub fn ending(mut self, end: NaiveDate) -> Self {
        self.end_date = Some(end);
        self
    }

    pub fn with_alert_threshold(mut self, threshold: u8) -> Self {
        self.alert_threshold = Some(threshold);
        self
    }

    /// Materialises the draft without validating it.
    pub(crate) fn into_budget(self, start: NaiveDate, alert_threshold: u8) -> Budget {
        let category_id = self.category_ids.iter().next().cloned();
        Budget {
            id: Uuid::new_v4().to_string(),
            user_id: self.user_id,
            name: self.name,
            category_ids: self.category_ids,
            category_id,
            account_ids: self.account_ids,
            period: self.period,
            start_date: start,
            end_date: self.end_date,
            amount: self.amount,
            spent: 0.0,
            transaction_count: 0,
            alert_threshold,
            active: true,
            created_at: Utc::now(),
        }
    }
}
