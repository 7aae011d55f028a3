use std::{collections::BTreeSet, fmt};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TransactionType {
    Expense,
    Income,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionType::Expense => "Expense",
            TransactionType::Income => "Income",
        };
        f.write_str(label)
    }
}

/// An expense or income record. The engine only reads transactions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: String,
    pub kind: TransactionType,
    pub amount: f64,
    pub category_id: String,
    pub account_id: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub label_ids: BTreeSet<String>,
}

impl Transaction {
    pub fn new(
        kind: TransactionType,
        amount: f64,
        category_id: impl Into<String>,
        account_id: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            amount,
            category_id: category_id.into(),
            account_id: account_id.into(),
            date,
            created_at: Utc::now(),
            note: None,
            description: None,
            label_ids: BTreeSet::new(),
        }
    }

    pub fn expense(
        amount: f64,
        category_id: impl Into<String>,
        account_id: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self::new(TransactionType::Expense, amount, category_id, account_id, date)
    }

    pub fn income(
        amount: f64,
        category_id: impl Into<String>,
        account_id: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self::new(TransactionType::Income, amount, category_id, account_id, date)
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn created(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }
}
