//! Spend aggregation over an already filtered set of transactions.

use std::{
    cmp::Ordering,
    collections::{BTreeMap, HashMap},
    fmt,
};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::{AccountDirectory, CategoryDirectory, Transaction};

/// Spend recorded on one day of the month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailySpend {
    /// Day of month, 1-based.
    pub day: u32,
    /// Label used on charts.
    pub label: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryBreakdown {
    pub category_id: String,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub total: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountBreakdown {
    pub account_id: String,
    pub name: String,
    pub total: f64,
    pub count: usize,
}

pub fn total_spent(filtered: &[Transaction]) -> f64 {
    filtered.iter().map(|txn| txn.amount).sum()
}

/// Totals keyed by day of month, ascending by day number. Windows longer than
/// a month fold same-numbered days together. Days without spend are omitted.
pub fn daily_spending(filtered: &[Transaction]) -> Vec<DailySpend> {
    let mut by_day: BTreeMap<u32, f64> = BTreeMap::new();
    for txn in filtered {
        *by_day.entry(txn.date.day()).or_insert(0.0) += txn.amount;
    }
    by_day
        .into_iter()
        .map(|(day, amount)| DailySpend {
            day,
            label: day.to_string(),
            amount,
        })
        .collect()
}

/// Sums amounts per calendar date for the trend walk.
pub(crate) fn spend_by_date(filtered: &[Transaction]) -> BTreeMap<NaiveDate, f64> {
    let mut totals = BTreeMap::new();
    for txn in filtered {
        *totals.entry(txn.date).or_insert(0.0) += txn.amount;
    }
    totals
}

/// Groups spend by category, largest total first. Unknown categories take the
/// directory fallback.
pub fn category_breakdown(
    filtered: &[Transaction],
    categories: &CategoryDirectory,
) -> Vec<CategoryBreakdown> {
    let mut grouped: HashMap<&str, Accumulator> = HashMap::new();
    for txn in filtered {
        grouped.entry(txn.category_id.as_str()).or_default().add(txn.amount);
    }

    let mut rows: Vec<CategoryBreakdown> = grouped
        .into_iter()
        .map(|(category_id, acc)| {
            let info = categories.resolve(category_id);
            CategoryBreakdown {
                category_id: category_id.to_string(),
                name: info.name.clone(),
                icon: info.icon.clone(),
                color: info.color.clone(),
                total: acc.total,
                count: acc.count,
            }
        })
        .collect();
    rows.sort_by(|a, b| {
        descending(a.total, b.total).then_with(|| a.category_id.cmp(&b.category_id))
    });
    rows
}

/// Groups spend by account, largest total first.
pub fn account_breakdown(
    filtered: &[Transaction],
    accounts: &AccountDirectory,
) -> Vec<AccountBreakdown> {
    let mut grouped: HashMap<&str, Accumulator> = HashMap::new();
    for txn in filtered {
        grouped.entry(txn.account_id.as_str()).or_default().add(txn.amount);
    }

    let mut rows: Vec<AccountBreakdown> = grouped
        .into_iter()
        .map(|(account_id, acc)| AccountBreakdown {
            account_id: account_id.to_string(),
            name: accounts.name_of(account_id),
            total: acc.total,
            count: acc.count,
        })
        .collect();
    rows.sort_by(|a, b| {
        descending(a.total, b.total).then_with(|| a.account_id.cmp(&b.account_id))
    });
    rows
}

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

#[derive(Default)]
struct Accumulator {
    total: f64,
    count: usize,
}

impl Accumulator {
    fn add(&mut self, amount: f64) {
        self.total += amount;
        self.count += 1;
    }
}

/// Where a budget stands against its limit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BudgetStatus {
    Empty,
    UnderBudget,
    NearLimit,
    OverBudget,
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BudgetStatus::Empty => "Empty",
            BudgetStatus::UnderBudget => "Under Budget",
            BudgetStatus::NearLimit => "Near Limit",
            BudgetStatus::OverBudget => "Over Budget",
        };
        f.write_str(label)
    }
}

/// Spend measured against the budget limit for one window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetProgress {
    pub limit: f64,
    pub spent: f64,
    pub remaining: f64,
    pub percent_used: Option<f64>,
    pub status: BudgetStatus,
    /// `true` once `percent_used` reaches the budget's alert threshold.
    pub alert: bool,
}

impl BudgetProgress {
    pub fn from_parts(limit: f64, spent: f64, alert_threshold: u8) -> Self {
        let remaining = limit - spent;
        let percent_used = if limit.abs() > f64::EPSILON {
            Some(spent * 100.0 / limit)
        } else if spent.abs() > f64::EPSILON {
            Some(100.0)
        } else {
            None
        };
        let alert = percent_used
            .map(|percent| percent >= f64::from(alert_threshold))
            .unwrap_or(false);
        let status = if limit.abs() < f64::EPSILON && spent.abs() < f64::EPSILON {
            BudgetStatus::Empty
        } else if spent > limit {
            BudgetStatus::OverBudget
        } else if alert {
            BudgetStatus::NearLimit
        } else {
            BudgetStatus::UnderBudget
        };
        Self {
            limit,
            spent,
            remaining,
            percent_used,
            status,
            alert,
        }
    }
}
