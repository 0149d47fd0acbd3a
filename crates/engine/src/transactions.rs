//! Transaction primitives.
//!
//! A `Transaction` is one recorded income or expense. Everything but `id`
//! and `created_at` can be replaced through a [`TransactionDraft`].

use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Category, EngineError};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    #[default]
    Expense,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = EngineError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(EngineError::UnknownKind(other.to_string())),
        }
    }
}

/// The replaceable part of a transaction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransactionDraft {
    pub amount: f64,
    pub date: NaiveDate,
    pub description: String,
    pub kind: TransactionKind,
    pub category: Category,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: Uuid,
    pub amount: f64,
    pub date: NaiveDate,
    pub description: String,
    pub kind: TransactionKind,
    pub category: Category,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Builds a new record with a fresh id, stamped with the current time.
    pub fn new(draft: TransactionDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount: draft.amount,
            date: draft.date,
            description: draft.description,
            kind: draft.kind,
            category: draft.category,
            created_at: Utc::now(),
        }
    }

    /// Overwrites every replaceable field; `id` and `created_at` stay.
    pub fn apply(&mut self, draft: TransactionDraft) {
        self.amount = draft.amount;
        self.date = draft.date;
        self.description = draft.description;
        self.kind = draft.kind;
        self.category = draft.category;
    }

    pub fn draft(&self) -> TransactionDraft {
        TransactionDraft {
            amount: self.amount,
            date: self.date,
            description: self.description.clone(),
            kind: self.kind,
            category: self.category,
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }
}
