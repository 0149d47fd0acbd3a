//! CSV export of the transaction listing.

use csv::Writer;
use serde::Serialize;

use crate::{EngineError, ResultEngine, Transaction, money::format_amount};

#[derive(Serialize)]
struct ExportRow<'a> {
    id: String,
    date: String,
    kind: &'static str,
    category: &'static str,
    description: &'a str,
    amount: String,
}

/// Writes `transactions` as CSV, one row each, in the order given.
pub fn to_csv<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> ResultEngine<Vec<u8>> {
    let mut writer = Writer::from_writer(vec![]);
    for tx in transactions {
        writer
            .serialize(ExportRow {
                id: tx.id.to_string(),
                date: tx.date.format("%Y-%m-%d").to_string(),
                kind: tx.kind.as_str(),
                category: tx.category.label(),
                description: &tx.description,
                amount: format_amount(tx.amount),
            })
            .map_err(|err| EngineError::Export(format!("failed to serialize row: {err}")))?;
    }

    writer
        .into_inner()
        .map_err(|err| EngineError::Export(format!("failed to finalize export: {err}")))
}
