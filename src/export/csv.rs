//! CSV export of the transaction history

use std::io::Write;

use serde::Serialize;

use crate::error::TrackerResult;
use crate::models::Transaction;
use crate::storage::Storage;

#[derive(Serialize)]
struct TransactionRecord<'a> {
    amount: String,
    category: &'a str,
    description: &'a str,
    date: String,
    #[serde(rename = "type")]
    kind: &'static str,
}

impl<'a> From<&'a Transaction> for TransactionRecord<'a> {
    fn from(txn: &'a Transaction) -> Self {
        Self {
            amount: format!("{:.2}", txn.amount.as_f64()),
            category: &txn.category,
            description: &txn.description,
            date: txn.date.format("%Y-%m-%d").to_string(),
            kind: txn.kind.as_str(),
        }
    }
}

/// Write transactions as CSV, oldest first
///
/// Columns: `amount,category,description,date,type`. Same-day transactions
/// keep the order they were recorded in. Returns the number of rows written.
pub fn write_transactions_csv<W: Write>(
    transactions: &[Transaction],
    writer: W,
) -> TrackerResult<usize> {
    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    sorted.sort_by_key(|t| t.date);

    let mut csv_writer = csv::Writer::from_writer(writer);
    if sorted.is_empty() {
        csv_writer.write_record(["amount", "category", "description", "date", "type"])?;
    }
    for txn in &sorted {
        csv_writer.serialize(TransactionRecord::from(*txn))?;
    }
    csv_writer.flush()?;

    Ok(sorted.len())
}

/// Export every stored transaction to CSV
pub fn export_transactions_csv<W: Write>(storage: &Storage, writer: W) -> TrackerResult<usize> {
    let transactions = storage.transactions.get_all()?;
    write_transactions_csv(&transactions, writer)
}
