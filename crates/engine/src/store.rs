//! In-memory transaction collection.
//!
//! The store never touches storage on its own: [`TransactionStore::load`] and
//! [`TransactionStore::save`] are the only boundary calls, and the caller
//! decides when to make them.

use std::collections::HashSet;

use uuid::Uuid;

use crate::{ResultEngine, Transaction, TransactionDraft, storage::Storage};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionStore {
    transactions: Vec<Transaction>,
}

impl TransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the collection from `key`.
    ///
    /// A missing slot, an unreadable slot and content that does not decode
    /// as a transaction list all produce an empty store. So does a list that
    /// repeats an id, or holds a non-positive amount or a blank description.
    pub fn load(storage: &impl Storage, key: &str) -> Self {
        let content = match storage.read(key) {
            Ok(Some(content)) => content,
            Ok(None) => {
                tracing::debug!("slot {key} is empty, starting with no transactions");
                return Self::default();
            }
            Err(err) => {
                tracing::warn!("failed to read slot {key}: {err}");
                return Self::default();
            }
        };

        let transactions = match serde_json::from_str::<Vec<Transaction>>(&content) {
            Ok(transactions) => transactions,
            Err(err) => {
                tracing::warn!("discarding unreadable content in slot {key}: {err}");
                return Self::default();
            }
        };
        if let Some(problem) = first_violation(&transactions) {
            tracing::warn!("discarding content in slot {key}: {problem}");
            return Self::default();
        }

        tracing::debug!("loaded {} transactions from {key}", transactions.len());
        Self { transactions }
    }

    /// Writes the whole collection to `key`.
    pub fn save(&self, storage: &mut impl Storage, key: &str) -> ResultEngine<()> {
        let payload = serde_json::to_string(&self.transactions)?;
        storage.write(key, &payload)?;
        tracing::debug!("saved {} transactions to {key}", self.transactions.len());
        Ok(())
    }

    pub fn add(&mut self, tx: Transaction) {
        self.transactions.push(tx);
    }

    /// Replaces the editable fields of `id`. Returns `false` when no such
    /// transaction exists.
    pub fn update(&mut self, id: Uuid, draft: TransactionDraft) -> bool {
        match self.transactions.iter_mut().find(|tx| tx.id == id) {
            Some(tx) => {
                tx.apply(draft);
                true
            }
            None => false,
        }
    }

    /// Drops `id`. Returns `false` when no such transaction exists.
    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.transactions.len();
        self.transactions.retain(|tx| tx.id != id);
        self.transactions.len() != before
    }

    pub fn get(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|tx| tx.id == id)
    }

    /// Every transaction, in no particular order.
    pub fn all(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Display order: newest date first, equal dates keep insertion order.
    pub fn sorted_by_date(&self) -> Vec<&Transaction> {
        let mut sorted: Vec<&Transaction> = self.transactions.iter().collect();
        sorted.sort_by(|a, b| b.date.cmp(&a.date));
        sorted
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

fn first_violation(transactions: &[Transaction]) -> Option<String> {
    let mut seen = HashSet::with_capacity(transactions.len());
    transactions.iter().find_map(|tx| {
        if !seen.insert(tx.id) {
            Some(format!("duplicate id {}", tx.id))
        } else if tx.amount <= 0.0 {
            Some(format!("transaction {} has amount {}", tx.id, tx.amount))
        } else if tx.description.trim().is_empty() {
            Some(format!("transaction {} has no description", tx.id))
        } else {
            None
        }
    })
}
